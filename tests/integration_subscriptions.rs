mod common;

use axum::http::StatusCode;
use common::{create_regular_user, create_test_course, send, setup_test_app};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_toggle_alternates_messages(pool: PgPool) {
    let owner = create_regular_user(&pool).await;
    let subscriber = create_regular_user(&pool).await;
    let course = create_test_course(&pool, owner.id, "Popular").await;

    let app = setup_test_app(pool.clone()).await;
    let body = json!({ "course": course.to_string() });

    let (status, response) = send(
        &app.router,
        "POST",
        "/api/subscriptions",
        Some(&subscriber.token),
        Some(body.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["message"], "Подписка включена");

    let (status, response) = send(
        &app.router,
        "POST",
        "/api/subscriptions",
        Some(&subscriber.token),
        Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["message"], "Подписка отключена");

    let rows = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM subscriptions WHERE course_id = $1")
        .bind(course)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_toggle_unknown_or_invalid_course(pool: PgPool) {
    let user = create_regular_user(&pool).await;
    let app = setup_test_app(pool.clone()).await;

    for body in [
        json!({ "course": Uuid::new_v4().to_string() }),
        json!({ "course": "not-a-uuid" }),
        json!({}),
    ] {
        let (status, response) = send(
            &app.router,
            "POST",
            "/api/subscriptions",
            Some(&user.token),
            Some(body),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(response["error"], "Course not found");
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_toggle_without_readable_body(pool: PgPool) {
    let user = create_regular_user(&pool).await;
    let app = setup_test_app(pool.clone()).await;

    let (status, response) = send(
        &app.router,
        "POST",
        "/api/subscriptions",
        Some(&user.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(response["error"], "Course not found");

    let (status, _) = send(
        &app.router,
        "POST",
        "/api/subscriptions",
        Some(&user.token),
        Some(json!(["not", "an", "object"])),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_toggle_requires_authentication(pool: PgPool) {
    let owner = create_regular_user(&pool).await;
    let course = create_test_course(&pool, owner.id, "Course").await;
    let app = setup_test_app(pool.clone()).await;

    let (status, _) = send(
        &app.router,
        "POST",
        "/api/subscriptions",
        None,
        Some(json!({ "course": course.to_string() })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_subscriptions(pool: PgPool) {
    let owner = create_regular_user(&pool).await;
    let subscriber = create_regular_user(&pool).await;
    let first = create_test_course(&pool, owner.id, "First").await;
    let second = create_test_course(&pool, owner.id, "Second").await;

    let app = setup_test_app(pool.clone()).await;

    for course in [first, second] {
        let (status, _) = send(
            &app.router,
            "POST",
            "/api/subscriptions",
            Some(&subscriber.token),
            Some(json!({ "course": course.to_string() })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(
        &app.router,
        "GET",
        "/api/subscriptions",
        Some(&subscriber.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["course_title"].as_str().unwrap())
        .collect();
    assert_eq!(titles.len(), 2);
    assert!(titles.contains(&"First"));
    assert!(titles.contains(&"Second"));

    let (_, body) = send(&app.router, "GET", "/api/subscriptions", Some(&owner.token), None).await;
    assert!(body.as_array().unwrap().is_empty());
}
