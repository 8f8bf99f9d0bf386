//! Subscription models.
//!
//! A subscription row links a user to a course. Its existence is the whole
//! state: toggling deletes it when present and creates it otherwise.

use crate::ids::{CourseId, SubscriptionId, UserId};
use chrono::{DateTime, Utc};
use coursehub_core::serde::deserialize_lenient_uuid;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub user_id: UserId,
    pub course_id: CourseId,
    pub created_at: DateTime<Utc>,
}

/// Body of the toggle endpoint.
///
/// `course` is read leniently: a missing, null or malformed value becomes
/// `None` and is answered like an unknown course.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ToggleSubscriptionRequest {
    #[serde(default, deserialize_with = "deserialize_lenient_uuid")]
    #[schema(value_type = Option<String>, format = "uuid")]
    pub course: Option<Uuid>,
}

impl ToggleSubscriptionRequest {
    pub fn course_id(&self) -> Option<CourseId> {
        self.course.map(CourseId::from_uuid)
    }
}

/// Resulting state after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionState {
    Enabled,
    Disabled,
}

impl SubscriptionState {
    pub fn message(self) -> &'static str {
        match self {
            SubscriptionState::Enabled => "Подписка включена",
            SubscriptionState::Disabled => "Подписка отключена",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SubscriptionState::Enabled => "enabled",
            SubscriptionState::Disabled => "disabled",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Подписка включена")]
    pub message: String,
}

impl From<SubscriptionState> for MessageResponse {
    fn from(state: SubscriptionState) -> Self {
        Self {
            message: state.message().to_string(),
        }
    }
}

/// One of the requester's subscriptions, joined with the course title.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct SubscriptionView {
    pub course_id: CourseId,
    pub course_title: String,
    pub subscribed_at: DateTime<Utc>,
}
