//! # Coursehub Core
//!
//! Core types, errors, and utilities for the Coursehub API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Page-size bounded pagination for list endpoints
//! - [`password`]: Password hashing and verification
//! - [`permissions`]: Composable permission predicates (authenticated, moderator, owner)
//! - [`serde`]: Custom serde deserialization helpers
//!
//! # Example
//!
//! ```ignore
//! use coursehub_core::{AppError, Permission, Target};
//!
//! let policy = Permission::Authenticated & (Permission::Moderator | Permission::Owner);
//! policy.authorize(Some(&auth_user), Target::Collection)?;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Course not found"));
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod permissions;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{LessonPaginator, PageBounds, PageWindow, PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
pub use permissions::{Permission, Principal, Target};
