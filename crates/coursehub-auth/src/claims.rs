//! JWT claim structure for access tokens.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// JWT claims for access tokens.
///
/// - `sub`: User ID (subject)
/// - `email`: User's email address
/// - `role_ids`: Assigned role UUIDs (the moderator role among them)
/// - `is_staff`: Staff users list every user's courses and lessons
/// - `exp` / `iat`: Expiry and issued-at timestamps
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    /// User's email address
    pub email: String,
    /// Role IDs assigned to the user
    #[serde(default)]
    pub role_ids: Vec<Uuid>,
    /// Staff flag
    #[serde(default)]
    pub is_staff: bool,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
}
