mod common;

use axum::http::StatusCode;
use common::{create_moderator, create_regular_user, generate_unique_email, send, setup_test_app};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_register_success(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;
    let email = generate_unique_email();

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "email": email,
            "password": "supersecret",
            "first_name": "Ada",
            "last_name": "Lovelace"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], email);
    assert_eq!(body["is_staff"], false);
    assert!(body.get("password").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_duplicate_email(pool: PgPool) {
    let existing = create_regular_user(&pool).await;
    let app = setup_test_app(pool.clone()).await;

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "email": existing.email.to_uppercase(),
            "password": "supersecret",
            "first_name": "Dup",
            "last_name": "User"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already exists");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_register_validation_error(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let (status, _) = send(
        &app.router,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "email": "not-an-email",
            "password": "short",
            "first_name": "",
            "last_name": "User"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_success(pool: PgPool) {
    let user = create_regular_user(&pool).await;
    let app = setup_test_app(pool.clone()).await;

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": user.email, "password": user.password })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].is_string());
    assert_eq!(body["user"]["email"], user.email);

    let token = body["access_token"].as_str().unwrap();
    let (status, profile) = send(&app.router, "GET", "/api/auth/me", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["email"], user.email);
    assert_eq!(profile["is_moderator"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_invalid_credentials(pool: PgPool) {
    let user = create_regular_user(&pool).await;
    let app = setup_test_app(pool.clone()).await;

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": user.email, "password": "wrongpass" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_disabled_account(pool: PgPool) {
    let user = create_regular_user(&pool).await;
    sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    let app = setup_test_app(pool.clone()).await;

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": user.email, "password": user.password })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "User account is disabled");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_profile_reports_moderator(pool: PgPool) {
    let moderator = create_moderator(&pool).await;
    let app = setup_test_app(pool.clone()).await;

    let (status, body) =
        send(&app.router, "GET", "/api/auth/me", Some(&moderator.token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["is_moderator"], true);
    assert_eq!(body["is_staff"], true);
    assert_eq!(body["role_ids"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_profile_requires_token(pool: PgPool) {
    let app = setup_test_app(pool.clone()).await;

    let (status, _) = send(&app.router, "GET", "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app.router, "GET", "/api/auth/me", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
