use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{header, request::Parts},
};
use coursehub_auth::{Claims, verify_token};
use coursehub_core::{AppError, Principal};
use coursehub_models::{RoleId, UserId, system_roles};
use uuid::Uuid;

use crate::state::AppState;

/// An authenticated requester, built from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: UserId,
    pub claims: Claims,
}

impl AuthUser {
    /// Fails when the subject claim is not a user id.
    pub fn from_claims(claims: Claims) -> Result<Self, AppError> {
        let id = claims
            .sub
            .parse::<UserId>()
            .map_err(|_| AppError::unauthorized("Invalid user ID in token"))?;

        Ok(Self { id, claims })
    }

    pub fn user_id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.claims.email
    }

    pub fn has_role(&self, role_id: &RoleId) -> bool {
        self.claims.role_ids.contains(role_id.as_uuid())
    }

    pub fn is_moderator(&self) -> bool {
        self.has_role(&system_roles::MODERATOR)
    }

    /// Staff see every user's rows in listings.
    pub fn is_staff(&self) -> bool {
        self.claims.is_staff
    }

    pub fn scope(&self) -> Scope {
        Scope {
            user_id: self.id,
            all: self.is_staff(),
        }
    }
}

/// The rows a requester's queries may see: their own, or everyone's for
/// staff.
///
/// Queries bind both fields and filter with `($2 OR owner_id = $1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub user_id: UserId,
    pub all: bool,
}

impl Principal for AuthUser {
    fn principal_id(&self) -> Uuid {
        self.id.into_inner()
    }

    fn is_moderator(&self) -> bool {
        AuthUser::is_moderator(self)
    }
}

fn bearer_token(parts: &Parts) -> Option<Result<&str, AppError>> {
    let value = parts.headers.get(header::AUTHORIZATION)?;

    Some(
        value
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| AppError::unauthorized("Invalid authorization header format")),
    )
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        <AuthUser as OptionalFromRequestParts<AppState>>::from_request_parts(parts, state)
            .await?
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))
    }
}

/// A request without an `Authorization` header yields `None`; a header that
/// is present but invalid is still rejected with 401.
impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Ok(None);
        };

        let claims = verify_token(token?, &state.jwt_config)?;

        AuthUser::from_claims(claims).map(Some)
    }
}

/// Declares an extractor that authenticates the requester and evaluates a
/// permission policy at collection level, before any row is loaded.
#[macro_export]
macro_rules! require_policy {
    ($name:ident, $policy:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = coursehub_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = <$crate::middleware::auth::AuthUser as axum::extract::OptionalFromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;

                $crate::middleware::permissions::authorize(
                    &$policy,
                    auth_user.as_ref(),
                    coursehub_core::Target::Collection,
                )?;

                auth_user.map($name).ok_or_else(|| {
                    coursehub_core::AppError::unauthorized(
                        "Authentication credentials were not provided",
                    )
                })
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: String, role_ids: Vec<Uuid>, is_staff: bool) -> Claims {
        Claims {
            sub,
            email: "test@example.com".to_string(),
            role_ids,
            is_staff,
            exp: 9999999999,
            iat: 1234567890,
        }
    }

    #[test]
    fn test_from_claims_parses_user_id() {
        let id = Uuid::new_v4();
        let auth_user = AuthUser::from_claims(claims(id.to_string(), vec![], false)).unwrap();

        assert_eq!(auth_user.user_id().into_inner(), id);
        assert_eq!(auth_user.principal_id(), id);
        assert_eq!(auth_user.email(), "test@example.com");
    }

    #[test]
    fn test_from_claims_rejects_bad_subject() {
        let err = AuthUser::from_claims(claims("not-a-uuid".to_string(), vec![], false))
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }

    #[test]
    fn test_moderator_role() {
        let moderator = AuthUser::from_claims(claims(
            Uuid::new_v4().to_string(),
            vec![system_roles::MODERATOR.into_inner()],
            false,
        ))
        .unwrap();
        assert!(moderator.is_moderator());
        assert!(Principal::is_moderator(&moderator));

        let user = AuthUser::from_claims(claims(
            Uuid::new_v4().to_string(),
            vec![Uuid::new_v4()],
            false,
        ))
        .unwrap();
        assert!(!user.is_moderator());
    }

    #[test]
    fn test_staff_flag() {
        let staff = AuthUser::from_claims(claims(Uuid::new_v4().to_string(), vec![], true))
            .unwrap();
        assert!(staff.is_staff());
        assert!(!staff.is_moderator());
        assert!(staff.scope().all);
        assert_eq!(staff.scope().user_id, staff.user_id());

        let user = AuthUser::from_claims(claims(Uuid::new_v4().to_string(), vec![], false))
            .unwrap();
        assert!(!user.scope().all);
    }
}
