//! User domain models and DTOs.
//!
//! Users own courses and lessons, hold roles and subscribe to courses.
//! The password hash never leaves the database layer.

use crate::ids::{RoleId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// A user in the system.
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Staff users see every user's courses and lessons in listings.
    pub is_staff: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User row including the password hash, used only for credential checks.
#[derive(FromRow, Debug, Clone)]
pub struct UserCredentials {
    pub id: UserId,
    pub email: String,
    pub password: String,
    pub is_staff: bool,
    pub is_active: bool,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(email)]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    #[validate(length(min = 1, max = 150))]
    pub first_name: String,
    #[validate(length(min = 1, max = 150))]
    pub last_name: String,
}

#[derive(Deserialize, Debug, Clone, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    #[schema(example = "password123")]
    pub password: String,
}

#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
}

/// The authenticated user's own profile.
#[derive(Serialize, Debug, Clone, ToSchema)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: User,
    pub is_moderator: bool,
    pub role_ids: Vec<RoleId>,
}

/// Well-known roles created by the initial migration.
pub mod system_roles {
    use crate::ids::RoleId;

    /// Holders may read and update any course or lesson, but never create or
    /// delete one.
    pub const MODERATOR: RoleId = RoleId::from_u128(1);

    pub const MODERATOR_NAME: &str = "moderators";

    pub fn is_system_role(role_id: &RoleId) -> bool {
        *role_id == MODERATOR
    }
}
