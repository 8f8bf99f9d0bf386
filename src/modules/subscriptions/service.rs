use anyhow::anyhow;
use coursehub_core::AppError;
use coursehub_models::{CourseId, SubscriptionState, SubscriptionView, UserId};
use sqlx::PgPool;
use tracing::{info, instrument};

use crate::metrics::track_subscription_toggled;

pub struct SubscriptionService;

impl SubscriptionService {
    /// Flips the (user, course) subscription: removes it when present,
    /// creates it otherwise.
    ///
    /// Both steps run in one transaction and the insert tolerates a row
    /// created concurrently, so at most one row per pair ever exists.
    #[instrument(skip(db))]
    pub async fn toggle(
        db: &PgPool,
        user_id: UserId,
        course_id: Option<CourseId>,
    ) -> Result<SubscriptionState, AppError> {
        let course_not_found = || AppError::not_found(anyhow!("Course not found"));
        let course_id = course_id.ok_or_else(course_not_found)?;

        let mut tx = db.begin().await?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM courses WHERE id = $1)",
        )
        .bind(course_id)
        .fetch_one(&mut *tx)
        .await?;

        if !exists {
            return Err(course_not_found());
        }

        let removed = sqlx::query(
            "DELETE FROM subscriptions WHERE user_id = $1 AND course_id = $2",
        )
        .bind(user_id)
        .bind(course_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let state = if removed > 0 {
            SubscriptionState::Disabled
        } else {
            sqlx::query(
                r#"INSERT INTO subscriptions (user_id, course_id)
                   VALUES ($1, $2)
                   ON CONFLICT (user_id, course_id) DO NOTHING"#,
            )
            .bind(user_id)
            .bind(course_id)
            .execute(&mut *tx)
            .await?;

            SubscriptionState::Enabled
        };

        tx.commit().await?;

        track_subscription_toggled(state.as_str());
        info!(user_id = %user_id, course_id = %course_id, state = state.as_str(), "Subscription toggled");

        Ok(state)
    }

    #[instrument(skip(db))]
    pub async fn list_for_user(
        db: &PgPool,
        user_id: UserId,
    ) -> Result<Vec<SubscriptionView>, AppError> {
        let subscriptions = sqlx::query_as::<_, SubscriptionView>(
            r#"SELECT s.course_id, c.title AS course_title, s.created_at AS subscribed_at
               FROM subscriptions s
               JOIN courses c ON c.id = s.course_id
               WHERE s.user_id = $1
               ORDER BY s.created_at DESC"#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;

        Ok(subscriptions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    async fn create_test_user(pool: &PgPool) -> UserId {
        sqlx::query_scalar::<_, UserId>(
            r#"INSERT INTO users (first_name, last_name, email, password)
               VALUES ('Test', 'Subscriber', $1, 'hashed') RETURNING id"#,
        )
        .bind(format!("sub-{}@test.com", uuid::Uuid::new_v4()))
        .fetch_one(pool)
        .await
        .unwrap()
    }

    async fn create_test_course(pool: &PgPool, owner: UserId) -> CourseId {
        sqlx::query_scalar::<_, CourseId>(
            r#"INSERT INTO courses (title, preview, description, owner_id)
               VALUES ('Course', '', '', $1) RETURNING id"#,
        )
        .bind(owner)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    async fn count_rows(pool: &PgPool, user_id: UserId, course_id: CourseId) -> i64 {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM subscriptions WHERE user_id = $1 AND course_id = $2",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(pool)
        .await
        .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_toggle_alternates(pool: PgPool) {
        let user = create_test_user(&pool).await;
        let course = create_test_course(&pool, user).await;

        let first = SubscriptionService::toggle(&pool, user, Some(course))
            .await
            .unwrap();
        assert_eq!(first, SubscriptionState::Enabled);
        assert_eq!(count_rows(&pool, user, course).await, 1);

        let second = SubscriptionService::toggle(&pool, user, Some(course))
            .await
            .unwrap();
        assert_eq!(second, SubscriptionState::Disabled);
        assert_eq!(count_rows(&pool, user, course).await, 0);

        let third = SubscriptionService::toggle(&pool, user, Some(course))
            .await
            .unwrap();
        assert_eq!(third, SubscriptionState::Enabled);
        assert_eq!(count_rows(&pool, user, course).await, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_toggle_unknown_course(pool: PgPool) {
        let user = create_test_user(&pool).await;

        let err = SubscriptionService::toggle(&pool, user, Some(CourseId::new()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.error.to_string(), "Course not found");

        let err = SubscriptionService::toggle(&pool, user, None)
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_list_for_user(pool: PgPool) {
        let user = create_test_user(&pool).await;
        let other = create_test_user(&pool).await;
        let course = create_test_course(&pool, other).await;

        SubscriptionService::toggle(&pool, user, Some(course))
            .await
            .unwrap();

        let mine = SubscriptionService::list_for_user(&pool, user).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].course_id, course);
        assert_eq!(mine[0].course_title, "Course");

        assert!(
            SubscriptionService::list_for_user(&pool, other)
                .await
                .unwrap()
                .is_empty()
        );
    }
}
