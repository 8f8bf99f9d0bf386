use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use coursehub::notifications::ChannelNotificationQueue;
use coursehub::router::init_router;
use coursehub::state::AppState;
use coursehub_auth::create_access_token;
use coursehub_config::{CorsConfig, EmailConfig, JwtConfig, PaginationConfig};
use coursehub_core::hash_password;
use coursehub_models::{CourseId, UserId, system_roles};
use http_body_util::BodyExt;
use serde_json::Value;
#[allow(unused_imports)]
use sqlx::PgPool;
use tokio::sync::mpsc::UnboundedReceiver;
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestUser {
    pub id: UserId,
    pub email: String,
    pub password: String,
    pub token: String,
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub notifications: UnboundedReceiver<CourseId>,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "coursehub-test-secret".to_string(),
        access_token_expiry: 3600,
    }
}

pub async fn setup_test_app(pool: PgPool) -> TestApp {
    dotenvy::dotenv().ok();

    let (queue, notifications) = ChannelNotificationQueue::new();
    let state = AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        email_config: EmailConfig::disabled(),
        cors_config: CorsConfig::from_env(),
        pagination_config: PaginationConfig::default(),
        notifications: Arc::new(queue),
    };

    TestApp {
        router: init_router(state),
        notifications,
    }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

/// Inserts a user and issues an access token carrying its roles.
pub async fn create_test_user(pool: &PgPool, moderator: bool, staff: bool) -> TestUser {
    let email = generate_unique_email();
    let password = "testpass123".to_string();
    let hashed = hash_password(&password).unwrap();

    let id = sqlx::query_scalar::<_, UserId>(
        r#"INSERT INTO users (first_name, last_name, email, password, is_staff)
           VALUES ('Test', 'User', $1, $2, $3)
           RETURNING id"#,
    )
    .bind(&email)
    .bind(&hashed)
    .bind(staff)
    .fetch_one(pool)
    .await
    .unwrap();

    let mut role_ids = Vec::new();
    if moderator {
        sqlx::query("INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2)")
            .bind(id)
            .bind(system_roles::MODERATOR)
            .execute(pool)
            .await
            .unwrap();
        role_ids.push(system_roles::MODERATOR.into_inner());
    }

    let token =
        create_access_token(id.into_inner(), &email, role_ids, staff, &test_jwt_config()).unwrap();

    TestUser {
        id,
        email,
        password,
        token,
    }
}

#[allow(dead_code)]
pub async fn create_regular_user(pool: &PgPool) -> TestUser {
    create_test_user(pool, false, false).await
}

#[allow(dead_code)]
pub async fn create_moderator(pool: &PgPool) -> TestUser {
    create_test_user(pool, true, true).await
}

#[allow(dead_code)]
pub async fn create_test_course(pool: &PgPool, owner: UserId, title: &str) -> CourseId {
    sqlx::query_scalar::<_, CourseId>(
        r#"INSERT INTO courses (title, preview, description, owner_id)
           VALUES ($1, 'preview', 'description', $2)
           RETURNING id"#,
    )
    .bind(title)
    .bind(owner)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn create_test_lesson(
    pool: &PgPool,
    owner: UserId,
    course: Option<CourseId>,
    title: &str,
) -> Uuid {
    sqlx::query_scalar::<_, Uuid>(
        r#"INSERT INTO lessons (title, description, preview, video_link, course_id, owner_id)
           VALUES ($1, 'description', 'preview', 'https://youtu.be/dQw4w9WgXcQ', $2, $3)
           RETURNING id"#,
    )
    .bind(title)
    .bind(course)
    .bind(owner)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Sends a request and returns the status with the decoded JSON body
/// (`Value::Null` for empty bodies).
#[allow(dead_code)]
pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}
