use anyhow::anyhow;
use coursehub_core::AppError;
use coursehub_models::{
    Course, CourseDetail, CourseId, CourseWithStats, CreateCourseDto, Lesson, UpdateCourseDto,
    UserId,
};
use sqlx::PgPool;
use tracing::instrument;

use crate::metrics::track_course_created;
use crate::middleware::auth::Scope;

const COURSE_COLUMNS: &str = "id, title, preview, description, owner_id, created_at, updated_at";

/// `$1` is the requesting user, used for `is_subscribed`.
const COURSE_WITH_STATS: &str = r#"SELECT
        c.id,
        c.title,
        c.preview,
        c.description,
        c.owner_id,
        c.created_at,
        c.updated_at,
        (SELECT COUNT(*) FROM lessons l WHERE l.course_id = c.id) AS lessons_count,
        EXISTS(
            SELECT 1 FROM subscriptions s WHERE s.course_id = c.id AND s.user_id = $1
        ) AS is_subscribed
       FROM courses c"#;

fn course_not_found() -> AppError {
    AppError::not_found(anyhow!("Course not found"))
}

pub struct CourseService;

impl CourseService {
    /// Inserts the course with `owner` already bound, so the row never
    /// exists without its owner.
    #[instrument(skip(db))]
    pub async fn create_course(
        db: &PgPool,
        owner: UserId,
        dto: CreateCourseDto,
    ) -> Result<CourseWithStats, AppError> {
        let course = sqlx::query_as::<_, CourseWithStats>(
            r#"INSERT INTO courses (title, preview, description, owner_id)
               VALUES ($1, $2, $3, $4)
               RETURNING id, title, preview, description, owner_id, created_at, updated_at,
                         0::BIGINT AS lessons_count, FALSE AS is_subscribed"#,
        )
        .bind(&dto.title)
        .bind(&dto.preview)
        .bind(&dto.description)
        .bind(owner)
        .fetch_one(db)
        .await?;

        track_course_created();

        Ok(course)
    }

    #[instrument(skip(db))]
    pub async fn list_courses(db: &PgPool, scope: Scope) -> Result<Vec<CourseWithStats>, AppError> {
        let courses = sqlx::query_as::<_, CourseWithStats>(&format!(
            "{COURSE_WITH_STATS} WHERE ($2 OR c.owner_id = $1) ORDER BY c.created_at, c.id"
        ))
        .bind(scope.user_id)
        .bind(scope.all)
        .fetch_all(db)
        .await?;

        Ok(courses)
    }

    /// Looks a course up regardless of who may see it.
    #[instrument(skip(db))]
    pub async fn find_course(db: &PgPool, id: CourseId) -> Result<Option<Course>, AppError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(db)
        .await?;

        Ok(course)
    }

    /// Looks a course up among the rows `scope` may see. Anything else is
    /// reported as not found.
    #[instrument(skip(db))]
    pub async fn get_visible_course(
        db: &PgPool,
        scope: Scope,
        id: CourseId,
    ) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1 AND ($3 OR owner_id = $2)"
        ))
        .bind(id)
        .bind(scope.user_id)
        .bind(scope.all)
        .fetch_optional(db)
        .await?
        .ok_or_else(course_not_found)
    }

    #[instrument(skip(db))]
    pub async fn get_course_with_stats(
        db: &PgPool,
        scope: Scope,
        id: CourseId,
    ) -> Result<CourseWithStats, AppError> {
        sqlx::query_as::<_, CourseWithStats>(&format!(
            "{COURSE_WITH_STATS} WHERE c.id = $3 AND ($2 OR c.owner_id = $1)"
        ))
        .bind(scope.user_id)
        .bind(scope.all)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(course_not_found)
    }

    #[instrument(skip(db))]
    pub async fn get_course_detail(
        db: &PgPool,
        course: CourseWithStats,
    ) -> Result<CourseDetail, AppError> {
        let lessons = sqlx::query_as::<_, Lesson>(
            r#"SELECT id, title, description, preview, video_link, course_id, owner_id,
                      created_at, updated_at
               FROM lessons
               WHERE course_id = $1
               ORDER BY created_at, id"#,
        )
        .bind(course.id)
        .fetch_all(db)
        .await?;

        Ok(CourseDetail { course, lessons })
    }

    /// Applies the present fields of `dto`; absent ones keep their value.
    #[instrument(skip(db))]
    pub async fn update_course(
        db: &PgPool,
        id: CourseId,
        dto: UpdateCourseDto,
    ) -> Result<Course, AppError> {
        sqlx::query_as::<_, Course>(&format!(
            r#"UPDATE courses
               SET title = COALESCE($1, title),
                   preview = COALESCE($2, preview),
                   description = COALESCE($3, description),
                   updated_at = NOW()
               WHERE id = $4
               RETURNING {COURSE_COLUMNS}"#
        ))
        .bind(&dto.title)
        .bind(&dto.preview)
        .bind(&dto.description)
        .bind(id)
        .fetch_optional(db)
        .await?
        .ok_or_else(course_not_found)
    }

    #[instrument(skip(db))]
    pub async fn delete_course(db: &PgPool, id: CourseId) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(course_not_found());
        }

        Ok(())
    }
}
