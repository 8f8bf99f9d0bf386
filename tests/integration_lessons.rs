mod common;

use axum::http::StatusCode;
use common::{
    create_moderator, create_regular_user, create_test_course, create_test_lesson, send,
    setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_create_lesson(pool: PgPool) {
    let user = create_regular_user(&pool).await;
    let course = create_test_course(&pool, user.id, "Course").await;
    let app = setup_test_app(pool.clone()).await;

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/lessons",
        Some(&user.token),
        Some(json!({
            "title": "Lesson one",
            "description": "Getting started",
            "video_link": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "course_id": course.to_string()
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "Lesson one");
    assert_eq!(body["owner_id"], user.id.to_string());
    assert_eq!(body["course_id"], course.to_string());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_lesson_rejects_non_youtube_link(pool: PgPool) {
    let user = create_regular_user(&pool).await;
    let app = setup_test_app(pool.clone()).await;

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/lessons",
        Some(&user.token),
        Some(json!({
            "title": "Lesson",
            "video_link": "https://vimeo.com/12345"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("video_link"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_lesson_rejects_overlong_video_link(pool: PgPool) {
    let user = create_regular_user(&pool).await;
    let app = setup_test_app(pool.clone()).await;

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/lessons",
        Some(&user.token),
        Some(json!({
            "title": "Lesson",
            "video_link": format!("https://youtube.com/watch?v={}", "a".repeat(300))
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("video_link"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_lesson_unknown_course(pool: PgPool) {
    let user = create_regular_user(&pool).await;
    let app = setup_test_app(pool.clone()).await;

    let (status, body) = send(
        &app.router,
        "POST",
        "/api/lessons",
        Some(&user.token),
        Some(json!({ "title": "Orphan", "course_id": Uuid::new_v4().to_string() })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Course not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_moderator_cannot_create_lesson(pool: PgPool) {
    let moderator = create_moderator(&pool).await;
    let app = setup_test_app(pool.clone()).await;

    let (status, _) = send(
        &app.router,
        "POST",
        "/api/lessons",
        Some(&moderator.token),
        Some(json!({ "title": "Nope" })),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_lessons_default_page(pool: PgPool) {
    let user = create_regular_user(&pool).await;
    let other = create_regular_user(&pool).await;
    for i in 0..12 {
        create_test_lesson(&pool, user.id, None, &format!("Lesson {}", i)).await;
    }
    create_test_lesson(&pool, other.id, None, "Not mine").await;

    let app = setup_test_app(pool.clone()).await;

    let (status, body) = send(&app.router, "GET", "/api/lessons", Some(&user.token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["meta"]["total"], 12);
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["has_more"], true);

    let (_, body) = send(
        &app.router,
        "GET",
        "/api/lessons?page=2",
        Some(&user.token),
        None,
    )
    .await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["meta"]["has_more"], false);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_lessons_huge_page_is_empty(pool: PgPool) {
    let user = create_regular_user(&pool).await;
    create_test_lesson(&pool, user.id, None, "Only lesson").await;

    let app = setup_test_app(pool.clone()).await;

    for query in [
        "page=9223372036854775807&page_size=50",
        "offset=9223372036854775807",
    ] {
        let (status, body) = send(
            &app.router,
            "GET",
            &format!("/api/lessons?{}", query),
            Some(&user.token),
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK, "{query}");
        assert!(body["data"].as_array().unwrap().is_empty());
        assert_eq!(body["meta"]["total"], 1);
        assert_eq!(body["meta"]["has_more"], false);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_lessons_page_size_capped(pool: PgPool) {
    let user = create_regular_user(&pool).await;
    for i in 0..55 {
        create_test_lesson(&pool, user.id, None, &format!("Lesson {}", i)).await;
    }

    let app = setup_test_app(pool.clone()).await;

    let (status, body) = send(
        &app.router,
        "GET",
        "/api/lessons?page_size=500",
        Some(&user.token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 50);
    assert_eq!(body["meta"]["limit"], 50);
    assert_eq!(body["meta"]["total"], 55);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_staff_list_every_lesson(pool: PgPool) {
    let alice = create_regular_user(&pool).await;
    let bob = create_regular_user(&pool).await;
    let moderator = create_moderator(&pool).await;
    create_test_lesson(&pool, alice.id, None, "A").await;
    create_test_lesson(&pool, bob.id, None, "B").await;

    let app = setup_test_app(pool.clone()).await;

    let (_, body) = send(
        &app.router,
        "GET",
        "/api/lessons",
        Some(&moderator.token),
        None,
    )
    .await;
    assert_eq!(body["meta"]["total"], 2);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_lesson_detail_resolves_course_id(pool: PgPool) {
    let user = create_regular_user(&pool).await;
    let course = create_test_course(&pool, user.id, "Course as lesson").await;
    let lesson = create_test_lesson(&pool, user.id, Some(course), "Real lesson").await;

    let app = setup_test_app(pool.clone()).await;

    let (status, body) = send(
        &app.router,
        "GET",
        &format!("/api/lessons/{}", course),
        Some(&user.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], course.to_string());
    assert_eq!(body["title"], "Course as lesson");

    // A lesson's own id does not resolve
    let (status, _) = send(
        &app.router,
        "GET",
        &format!("/api/lessons/{}", lesson),
        Some(&user.token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_lesson_update_writes_course(pool: PgPool) {
    let user = create_regular_user(&pool).await;
    let course = create_test_course(&pool, user.id, "Before").await;

    let app = setup_test_app(pool.clone()).await;

    let (status, body) = send(
        &app.router,
        "PATCH",
        &format!("/api/lessons/{}", course),
        Some(&user.token),
        Some(json!({ "title": "After" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "After");

    let title = sqlx::query_scalar::<_, String>("SELECT title FROM courses WHERE id = $1")
        .bind(course)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(title, "After");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_moderator_retrieves_and_updates_lesson_detail(pool: PgPool) {
    let owner = create_regular_user(&pool).await;
    let moderator = create_moderator(&pool).await;
    let course = create_test_course(&pool, owner.id, "Reviewed").await;

    let app = setup_test_app(pool.clone()).await;
    let uri = format!("/api/lessons/{}", course);

    let (status, body) = send(&app.router, "GET", &uri, Some(&moderator.token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Reviewed");

    let (status, body) = send(
        &app.router,
        "PUT",
        &uri,
        Some(&moderator.token),
        Some(json!({ "title": "Reviewed and fixed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Reviewed and fixed");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_lesson_delete_owner_only(pool: PgPool) {
    let owner = create_regular_user(&pool).await;
    let moderator = create_moderator(&pool).await;
    let course = create_test_course(&pool, owner.id, "Doomed").await;

    let app = setup_test_app(pool.clone()).await;
    let uri = format!("/api/lessons/{}", course);

    let (status, _) = send(&app.router, "DELETE", &uri, Some(&moderator.token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app.router, "DELETE", &uri, Some(&owner.token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let remaining = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses WHERE id = $1")
        .bind(course)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);
}
