use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use coursehub_core::{AppError, PaginationParams};
use coursehub_models::{
    CourseId, CreateLessonDto, Lesson, PaginatedLessonsResponse, UpdateLessonDto, UserId,
};
use tracing::instrument;

use super::service::LessonService;
use crate::middleware::permissions::{
    Action, RequireCreate, RequireDestroy, RequireList, RequireRetrieve, RequireUpdate,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ParsedJson, ValidatedJson, validate};

#[utoipa::path(
    post,
    path = "/api/lessons",
    request_body = CreateLessonDto,
    responses(
        (status = 201, description = "Lesson created, owned by the requester", body = Lesson),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Moderators cannot create lessons", body = ErrorResponse),
        (status = 404, description = "Referenced course not found", body = ErrorResponse),
        (status = 422, description = "Validation error, e.g. a non-YouTube video link", body = ErrorResponse)
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_lesson(
    State(state): State<AppState>,
    RequireCreate(auth_user): RequireCreate,
    ValidatedJson(dto): ValidatedJson<CreateLessonDto>,
) -> Result<(StatusCode, Json<Lesson>), AppError> {
    let lesson = LessonService::create_lesson(&state.db, auth_user.user_id(), dto).await?;
    Ok((StatusCode::CREATED, Json(lesson)))
}

#[utoipa::path(
    get,
    path = "/api/lessons",
    params(PaginationParams),
    responses(
        (status = 200, description = "Own lessons, or all lessons for staff", body = PaginatedLessonsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_lessons(
    State(state): State<AppState>,
    RequireList(auth_user): RequireList,
    Query(params): Query<PaginationParams>,
) -> Result<Json<PaginatedLessonsResponse>, AppError> {
    let lessons = LessonService::list_lessons(
        &state.db,
        auth_user.scope(),
        state.lesson_paginator(),
        params,
    )
    .await?;

    Ok(Json(lessons))
}

/// Retrieve a lesson
///
/// `{id}` is resolved among the requester's visible courses and rendered as
/// a lesson.
#[utoipa::path(
    get,
    path = "/api/lessons/{id}",
    params(
        ("id" = CourseId, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Lesson view of the course", body = Lesson),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Requires moderator or owner", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_lesson(
    State(state): State<AppState>,
    RequireRetrieve(auth_user): RequireRetrieve,
    Path(id): Path<CourseId>,
) -> Result<Json<Lesson>, AppError> {
    let lesson = LessonService::get_lesson(&state.db, auth_user.scope(), id).await?;
    Action::Retrieve.authorize_object(&auth_user, lesson.owner_id.map(UserId::into_inner))?;

    Ok(Json(lesson))
}

#[utoipa::path(
    put,
    path = "/api/lessons/{id}",
    params(
        ("id" = CourseId, Path, description = "Course ID")
    ),
    request_body = UpdateLessonDto,
    responses(
        (status = 200, description = "Updated", body = Lesson),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Requires moderator or owner", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn update_lesson(
    State(state): State<AppState>,
    RequireUpdate(auth_user): RequireUpdate,
    Path(id): Path<CourseId>,
    ParsedJson(dto): ParsedJson<UpdateLessonDto>,
) -> Result<Json<Lesson>, AppError> {
    let lesson = LessonService::get_lesson(&state.db, auth_user.scope(), id).await?;
    Action::Update.authorize_object(&auth_user, lesson.owner_id.map(UserId::into_inner))?;

    validate(&dto)?;

    let lesson = LessonService::update_lesson(&state.db, id, dto).await?;
    Ok(Json(lesson))
}

#[utoipa::path(
    delete,
    path = "/api/lessons/{id}",
    params(
        ("id" = CourseId, Path, description = "Course ID")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only the owner may delete", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse)
    ),
    tag = "Lessons",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_lesson(
    State(state): State<AppState>,
    RequireDestroy(auth_user): RequireDestroy,
    Path(id): Path<CourseId>,
) -> Result<StatusCode, AppError> {
    let lesson = LessonService::get_lesson(&state.db, auth_user.scope(), id).await?;
    Action::Destroy.authorize_object(&auth_user, lesson.owner_id.map(UserId::into_inner))?;

    LessonService::delete_lesson(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
