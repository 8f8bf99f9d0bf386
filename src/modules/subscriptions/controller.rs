use axum::{Json, extract::State};
use coursehub_core::AppError;
use coursehub_models::{MessageResponse, SubscriptionView, ToggleSubscriptionRequest};
use tracing::instrument;

use super::service::SubscriptionService;
use crate::middleware::permissions::RequireAuthenticated;
use crate::modules::auth::controller::ErrorResponse;
use crate::state::AppState;
use crate::validator::LenientJson;

/// Toggle a subscription to a course
///
/// Subscribes when not subscribed and unsubscribes otherwise. A missing or
/// malformed `course`, or an unreadable body, is answered like an unknown
/// course.
#[utoipa::path(
    post,
    path = "/api/subscriptions",
    request_body = ToggleSubscriptionRequest,
    responses(
        (status = 200, description = "New subscription state", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Course not found", body = ErrorResponse)
    ),
    tag = "Subscriptions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn toggle_subscription(
    State(state): State<AppState>,
    RequireAuthenticated(auth_user): RequireAuthenticated,
    LenientJson(dto): LenientJson<ToggleSubscriptionRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let subscription =
        SubscriptionService::toggle(&state.db, auth_user.user_id(), dto.course_id()).await?;

    Ok(Json(subscription.into()))
}

#[utoipa::path(
    get,
    path = "/api/subscriptions",
    responses(
        (status = 200, description = "Courses the requester is subscribed to", body = Vec<SubscriptionView>),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Subscriptions",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn get_subscriptions(
    State(state): State<AppState>,
    RequireAuthenticated(auth_user): RequireAuthenticated,
) -> Result<Json<Vec<SubscriptionView>>, AppError> {
    let subscriptions = SubscriptionService::list_for_user(&state.db, auth_user.user_id()).await?;
    Ok(Json(subscriptions))
}
