use axum::{
    Json,
    extract::{FromRequest, Path, Request, State},
    http::StatusCode,
};
use coursehub_core::AppError;
use coursehub_models::{
    CourseDetail, CourseId, CourseWithStats, CreateCourseDto, UpdateCourseDto, UserId,
};
use tracing::instrument;

use super::service::CourseService;
use crate::middleware::permissions::{
    Action, RequireCreate, RequireDestroy, RequireList, RequireRetrieve, RequireUpdate,
};
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::{ParsedJson, ValidatedJson, validate};

#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CreateCourseDto,
    responses(
        (status = 201, description = "Course created, owned by the requester", body = CourseWithStats),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Moderators cannot create courses", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_course(
    State(state): State<AppState>,
    RequireCreate(auth_user): RequireCreate,
    ValidatedJson(dto): ValidatedJson<CreateCourseDto>,
) -> Result<(StatusCode, Json<CourseWithStats>), AppError> {
    let course = CourseService::create_course(&state.db, auth_user.user_id(), dto).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "Own courses, or all courses for staff", body = Vec<CourseWithStats>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_courses(
    State(state): State<AppState>,
    RequireList(auth_user): RequireList,
) -> Result<Json<Vec<CourseWithStats>>, AppError> {
    let courses = CourseService::list_courses(&state.db, auth_user.scope()).await?;
    Ok(Json(courses))
}

#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(
        ("id" = CourseId, Path, description = "Course ID")
    ),
    responses(
        (status = 200, description = "Course with its lessons", body = CourseDetail),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Requires moderator or owner", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_course(
    State(state): State<AppState>,
    RequireRetrieve(auth_user): RequireRetrieve,
    Path(id): Path<CourseId>,
) -> Result<Json<CourseDetail>, AppError> {
    let course = CourseService::get_course_with_stats(&state.db, auth_user.scope(), id).await?;
    Action::Retrieve.authorize_object(&auth_user, course.owner_id.map(UserId::into_inner))?;

    let detail = CourseService::get_course_detail(&state.db, course).await?;
    Ok(Json(detail))
}

/// Update a course and notify its subscribers
///
/// The notification is enqueued as soon as the course is known to exist,
/// before the requester's access is checked and before the body is read, so
/// a rejected or malformed update still notifies subscribers.
#[utoipa::path(
    put,
    path = "/api/courses/{id}",
    params(
        ("id" = CourseId, Path, description = "Course ID")
    ),
    request_body = UpdateCourseDto,
    responses(
        (status = 200, description = "Course updated", body = CourseWithStats),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Requires moderator or owner", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, request))]
pub async fn update_course(
    State(state): State<AppState>,
    RequireUpdate(auth_user): RequireUpdate,
    Path(id): Path<CourseId>,
    request: Request,
) -> Result<Json<CourseWithStats>, AppError> {
    let course = CourseService::find_course(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Course not found")))?;

    state.notifications.enqueue(course.id);

    let scope = auth_user.scope();
    let course = CourseService::get_visible_course(&state.db, scope, course.id).await?;
    Action::Update.authorize_object(&auth_user, course.owner_id.map(UserId::into_inner))?;

    let ParsedJson(dto) = ParsedJson::<UpdateCourseDto>::from_request(request, &state).await?;
    validate(&dto)?;

    let course = CourseService::update_course(&state.db, course.id, dto).await?;
    let course = CourseService::get_course_with_stats(&state.db, scope, course.id).await?;

    Ok(Json(course))
}

#[utoipa::path(
    delete,
    path = "/api/courses/{id}",
    params(
        ("id" = CourseId, Path, description = "Course ID")
    ),
    responses(
        (status = 204, description = "Course deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Only the owner may delete", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Courses",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    RequireDestroy(auth_user): RequireDestroy,
    Path(id): Path<CourseId>,
) -> Result<StatusCode, AppError> {
    let course = CourseService::get_visible_course(&state.db, auth_user.scope(), id).await?;
    Action::Destroy.authorize_object(&auth_user, course.owner_id.map(UserId::into_inner))?;

    CourseService::delete_course(&state.db, course.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
