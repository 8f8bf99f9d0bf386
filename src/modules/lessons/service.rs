use anyhow::anyhow;
use coursehub_core::{AppError, LessonPaginator, PaginationParams};
use coursehub_models::{
    CourseId, CreateLessonDto, Lesson, PaginatedLessonsResponse, UpdateCourseDto,
    UpdateLessonDto, UserId,
};
use sqlx::PgPool;
use tracing::instrument;

use crate::metrics::track_lesson_created;
use crate::middleware::auth::Scope;
use crate::modules::courses::service::CourseService;

const LESSON_COLUMNS: &str =
    "id, title, description, preview, video_link, course_id, owner_id, created_at, updated_at";

pub struct LessonService;

impl LessonService {
    #[instrument(skip(db))]
    pub async fn create_lesson(
        db: &PgPool,
        owner: UserId,
        dto: CreateLessonDto,
    ) -> Result<Lesson, AppError> {
        if let Some(course_id) = dto.course_id {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)",
            )
            .bind(course_id)
            .fetch_one(db)
            .await?;

            if !exists {
                return Err(AppError::not_found(anyhow!("Course not found")));
            }
        }

        let lesson = sqlx::query_as::<_, Lesson>(&format!(
            r#"INSERT INTO lessons (title, description, preview, video_link, course_id, owner_id)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING {LESSON_COLUMNS}"#
        ))
        .bind(&dto.title)
        .bind(&dto.description)
        .bind(&dto.preview)
        .bind(&dto.video_link)
        .bind(dto.course_id)
        .bind(owner)
        .fetch_one(db)
        .await?;

        track_lesson_created();

        Ok(lesson)
    }

    #[instrument(skip(db))]
    pub async fn list_lessons(
        db: &PgPool,
        scope: Scope,
        paginator: LessonPaginator,
        params: PaginationParams,
    ) -> Result<PaginatedLessonsResponse, AppError> {
        let window = paginator.window(&params);

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM lessons WHERE ($2 OR owner_id = $1)",
        )
        .bind(scope.user_id)
        .bind(scope.all)
        .fetch_one(db)
        .await?;

        let lessons = sqlx::query_as::<_, Lesson>(&format!(
            r#"SELECT {LESSON_COLUMNS}
               FROM lessons
               WHERE ($2 OR owner_id = $1)
               ORDER BY created_at, id
               LIMIT $3 OFFSET $4"#
        ))
        .bind(scope.user_id)
        .bind(scope.all)
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(db)
        .await?;

        Ok(PaginatedLessonsResponse {
            data: lessons,
            meta: paginator.meta(&window, total),
        })
    }

    // The lesson detail endpoints resolve `{id}` against courses, not
    // lessons. Lessons themselves are only reachable through the list.

    #[instrument(skip(db))]
    pub async fn get_lesson(db: &PgPool, scope: Scope, id: CourseId) -> Result<Lesson, AppError> {
        let course = CourseService::get_visible_course(db, scope, id).await?;
        Ok(Lesson::from_course(course))
    }

    /// Writes the fields courses and lessons share to the resolved course.
    /// `video_link` has no course column and is dropped.
    #[instrument(skip(db))]
    pub async fn update_lesson(
        db: &PgPool,
        id: CourseId,
        dto: UpdateLessonDto,
    ) -> Result<Lesson, AppError> {
        let shared = UpdateCourseDto {
            title: dto.title,
            preview: dto.preview,
            description: dto.description,
        };

        let course = CourseService::update_course(db, id, shared).await?;
        Ok(Lesson::from_course(course))
    }

    #[instrument(skip(db))]
    pub async fn delete_lesson(db: &PgPool, id: CourseId) -> Result<(), AppError> {
        CourseService::delete_course(db, id).await
    }
}
