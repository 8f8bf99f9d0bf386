//! # Coursehub CLI
//!
//! Account creation and database seeding for Coursehub development.
//!
//! ## Usage
//!
//! ```ignore
//! use coursehub_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(20).with_courses(3, 8);
//! seed_all(&pool, config).await?;
//! ```

pub mod accounts;
pub mod seeder;
