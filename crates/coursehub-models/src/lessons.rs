//! Lesson domain models and DTOs.

use crate::courses::Course;
use crate::ids::{CourseId, LessonId, UserId};
use chrono::{DateTime, Utc};
use coursehub_core::PaginationMeta;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

const VIDEO_HOSTS: &[&str] = &["youtube.com", "www.youtube.com", "m.youtube.com", "youtu.be"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    pub description: Option<String>,
    pub preview: Option<String>,
    pub video_link: Option<String>,
    pub course_id: Option<CourseId>,
    pub owner_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lesson {
    /// Renders a course row through the lesson representation. Fields only
    /// lessons have are left empty.
    pub fn from_course(course: Course) -> Self {
        Self {
            id: LessonId::from_uuid(course.id.into_inner()),
            title: course.title,
            description: course.description,
            preview: course.preview,
            video_link: None,
            course_id: None,
            owner_id: course.owner_id,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLessonDto {
    #[validate(length(min = 1, max = 150))]
    pub title: String,
    pub description: Option<String>,
    #[validate(length(max = 255))]
    pub preview: Option<String>,
    #[validate(length(max = 255), custom(function = "validate_video_link"))]
    #[schema(example = "https://www.youtube.com/watch?v=dQw4w9WgXcQ")]
    pub video_link: Option<String>,
    pub course_id: Option<CourseId>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateLessonDto {
    #[validate(length(min = 1, max = 150))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(max = 255))]
    pub preview: Option<String>,
    #[validate(length(max = 255), custom(function = "validate_video_link"))]
    pub video_link: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedLessonsResponse {
    pub data: Vec<Lesson>,
    pub meta: PaginationMeta,
}

/// Accepts only http(s) links to YouTube.
pub fn validate_video_link(link: &str) -> Result<(), ValidationError> {
    let rest = link
        .strip_prefix("https://")
        .or_else(|| link.strip_prefix("http://"))
        .ok_or_else(video_link_error)?;

    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority
        .rsplit_once('@')
        .map_or(authority, |(_, host)| host);
    let host = host.split(':').next().unwrap_or_default().to_ascii_lowercase();

    if VIDEO_HOSTS.contains(&host.as_str()) {
        Ok(())
    } else {
        Err(video_link_error())
    }
}

fn video_link_error() -> ValidationError {
    ValidationError::new("video_link").with_message("Only YouTube links are allowed".into())
}
