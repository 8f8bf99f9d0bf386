//! Per-action permission policies for courses and lessons.
//!
//! | Action | Policy |
//! |--------|--------|
//! | create | authenticated and not moderator |
//! | list, retrieve, update | authenticated and (moderator or owner) |
//! | destroy | authenticated and owner |
//!
//! The extractors below check the policy at collection level. Handlers call
//! [`Action::authorize_object`] once the row is resolved.

use coursehub_core::{AppError, Permission, Principal, Target};
use uuid::Uuid;

use crate::metrics::track_permission_denied;
use crate::middleware::auth::AuthUser;
use crate::require_policy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    List,
    Retrieve,
    Update,
    Destroy,
}

impl Action {
    pub fn policy(self) -> Permission {
        use Permission::{Authenticated, Moderator, Owner};

        match self {
            Action::Create => Authenticated & !Moderator,
            Action::List | Action::Retrieve | Action::Update => {
                Authenticated & (Moderator | Owner)
            }
            Action::Destroy => Authenticated & Owner,
        }
    }

    /// Object-level check against the resolved row's owner.
    pub fn authorize_object(self, auth_user: &AuthUser, owner: Option<Uuid>) -> Result<(), AppError> {
        authorize(&self.policy(), Some(auth_user), Target::Object { owner })
    }
}

/// [`Permission::authorize`] that also counts denials.
pub fn authorize<P: Principal>(
    policy: &Permission,
    principal: Option<&P>,
    target: Target,
) -> Result<(), AppError> {
    policy.authorize(principal, target).inspect_err(|_| {
        track_permission_denied(&policy.to_string());
    })
}

require_policy!(RequireAuthenticated, Permission::Authenticated);
require_policy!(RequireCreate, Action::Create.policy());
require_policy!(RequireList, Action::List.policy());
require_policy!(RequireRetrieve, Action::Retrieve.policy());
require_policy!(RequireUpdate, Action::Update.policy());
require_policy!(RequireDestroy, Action::Destroy.policy());
