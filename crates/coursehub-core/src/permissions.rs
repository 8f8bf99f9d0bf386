//! Composable permission predicates.
//!
//! A [`Permission`] is a boolean expression over three capability checks:
//!
//! - [`Permission::Authenticated`]: a valid token was presented
//! - [`Permission::Moderator`]: the principal belongs to the moderator role
//! - [`Permission::Owner`]: the principal owns the entity being accessed
//!
//! Expressions are built with `&`, `|` and `!`:
//!
//! ```ignore
//! use coursehub_core::permissions::{Permission, Target};
//!
//! let read = Permission::Authenticated & (Permission::Moderator | Permission::Owner);
//! let create = Permission::Authenticated & !Permission::Moderator;
//!
//! // Before any row is loaded
//! read.authorize(Some(&auth_user), Target::Collection)?;
//!
//! // After the row is resolved
//! read.authorize(Some(&auth_user), Target::Object { owner: course.owner_id })?;
//! ```
//!
//! # Evaluation
//!
//! Policies are evaluated twice per request. At [`Target::Collection`] no
//! entity is known yet, so `Owner` is vacuously satisfied and only the
//! role/authentication parts can deny. At [`Target::Object`] the whole
//! expression is evaluated against the resolved owner. An entity without an
//! owner is owned by nobody.

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use uuid::Uuid;

use crate::errors::AppError;

/// The requesting identity a permission is evaluated against.
pub trait Principal {
    /// Stable identifier compared with entity owners.
    fn principal_id(&self) -> Uuid;

    /// Whether the principal holds the moderator role.
    fn is_moderator(&self) -> bool;
}

/// What a permission check is being made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The endpoint as a whole, before any entity is loaded.
    Collection,
    /// A resolved entity and its owner.
    Object { owner: Option<Uuid> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Permission {
    Authenticated,
    Moderator,
    Owner,
    And(Box<Permission>, Box<Permission>),
    Or(Box<Permission>, Box<Permission>),
    Not(Box<Permission>),
}

impl Permission {
    /// Evaluates the expression for `principal` against `target`.
    pub fn check<P: Principal>(&self, principal: Option<&P>, target: Target) -> bool {
        match self {
            Permission::Authenticated => principal.is_some(),
            Permission::Moderator => principal.is_some_and(|p| p.is_moderator()),
            Permission::Owner => match target {
                Target::Collection => true,
                Target::Object { owner } => match (principal, owner) {
                    (Some(p), Some(owner)) => p.principal_id() == owner,
                    _ => false,
                },
            },
            Permission::And(lhs, rhs) => {
                lhs.check(principal, target) && rhs.check(principal, target)
            }
            Permission::Or(lhs, rhs) => {
                lhs.check(principal, target) || rhs.check(principal, target)
            }
            Permission::Not(inner) => !inner.check(principal, target),
        }
    }

    /// Like [`Permission::check`], but fails with `401` when there is no
    /// principal and the policy needs one, or `403` otherwise.
    pub fn authorize<P: Principal>(
        &self,
        principal: Option<&P>,
        target: Target,
    ) -> Result<(), AppError> {
        if self.check(principal, target) {
            return Ok(());
        }

        if principal.is_none() {
            return Err(AppError::unauthorized(
                "Authentication credentials were not provided",
            ));
        }

        Err(AppError::forbidden(format!(
            "Access denied. Required permission: {}",
            self
        )))
    }
}

impl BitAnd for Permission {
    type Output = Permission;

    fn bitand(self, rhs: Permission) -> Permission {
        Permission::And(Box::new(self), Box::new(rhs))
    }
}

impl BitOr for Permission {
    type Output = Permission;

    fn bitor(self, rhs: Permission) -> Permission {
        Permission::Or(Box::new(self), Box::new(rhs))
    }
}

impl Not for Permission {
    type Output = Permission;

    fn not(self) -> Permission {
        Permission::Not(Box::new(self))
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Permission::Authenticated => write!(f, "authenticated"),
            Permission::Moderator => write!(f, "moderator"),
            Permission::Owner => write!(f, "owner"),
            Permission::And(lhs, rhs) => write!(f, "{} and {}", Grouped(lhs), Grouped(rhs)),
            Permission::Or(lhs, rhs) => write!(f, "{} or {}", Grouped(lhs), Grouped(rhs)),
            Permission::Not(inner) => write!(f, "not {}", Grouped(inner)),
        }
    }
}

struct Grouped<'a>(&'a Permission);

impl fmt::Display for Grouped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Permission::And(..) | Permission::Or(..) => write!(f, "({})", self.0),
            other => write!(f, "{}", other),
        }
    }
}
