//! Course domain models and DTOs.

use crate::ids::{CourseId, UserId};
use crate::lessons::Lesson;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub preview: Option<String>,
    pub description: Option<String>,
    /// The creator. `None` once the owning user has been deleted.
    pub owner_id: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Course as returned by list, create and update.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CourseWithStats {
    pub id: CourseId,
    pub title: String,
    pub preview: Option<String>,
    pub description: Option<String>,
    pub owner_id: Option<UserId>,
    pub lessons_count: i64,
    /// Whether the requesting user is subscribed to this course.
    pub is_subscribed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Course as returned by retrieve, with its lessons inlined.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CourseDetail {
    #[serde(flatten)]
    pub course: CourseWithStats,
    pub lessons: Vec<Lesson>,
}

/// Payload for creating a course. The owner is always the requester and
/// cannot be supplied.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCourseDto {
    #[validate(length(min = 1, max = 150))]
    pub title: String,
    #[validate(length(max = 255))]
    pub preview: Option<String>,
    pub description: Option<String>,
}

/// Payload for PUT and PATCH. Absent fields keep their stored value.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCourseDto {
    #[validate(length(min = 1, max = 150))]
    pub title: Option<String>,
    #[validate(length(max = 255))]
    pub preview: Option<String>,
    pub description: Option<String>,
}
