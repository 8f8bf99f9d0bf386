//! # Coursehub Config
//!
//! Configuration types for the Coursehub API, loaded from environment variables:
//!
//! - [`jwt`]: JWT authentication configuration
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`email`]: Email/SMTP configuration for course update notifications
//! - [`pagination`]: Page size bounds for lesson listings
//! - [`server`]: Bind addresses for the API and metrics listeners
//!
//! # Example
//!
//! ```ignore
//! use coursehub_config::{JwtConfig, CorsConfig, EmailConfig};
//!
//! let jwt_config = JwtConfig::from_env();
//! let cors_config = CorsConfig::from_env();
//! let email_config = EmailConfig::from_env();
//! ```

pub mod cors;
pub mod email;
pub mod jwt;
pub mod pagination;
pub mod server;

// Re-export commonly used types at crate root
pub use cors::CorsConfig;
pub use email::EmailConfig;
pub use jwt::JwtConfig;
pub use pagination::PaginationConfig;
pub use server::ServerConfig;

/// Parses an environment variable, falling back to `default` when it is
/// unset or malformed.
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
