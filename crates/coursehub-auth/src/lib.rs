//! # Coursehub Auth
//!
//! Authentication types and JWT utilities for the Coursehub API.
//!
//! - [`claims`]: JWT claim structure for access tokens
//! - [`jwt`]: Token creation and verification
//!
//! Access tokens carry everything the permission predicates need (user id,
//! role ids, staff flag), so handlers never hit the database to authorize.
//!
//! # Example
//!
//! ```ignore
//! use coursehub_auth::{create_access_token, verify_token};
//! use coursehub_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, "user@example.com", vec![], false, &config)?;
//! let claims = verify_token(&token, &config)?;
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
