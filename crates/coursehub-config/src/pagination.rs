//! Page size bounds for lesson listings.
//!
//! - `LESSON_PAGE_SIZE`: Default lessons per page (default: 10)
//! - `LESSON_MAX_PAGE_SIZE`: Largest page a client may request (default: 50)

use crate::env_or;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationConfig {
    pub lesson_page_size: i64,
    pub lesson_max_page_size: i64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            lesson_page_size: 10,
            lesson_max_page_size: 50,
        }
    }
}

impl PaginationConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            lesson_page_size: env_or("LESSON_PAGE_SIZE", defaults.lesson_page_size),
            lesson_max_page_size: env_or("LESSON_MAX_PAGE_SIZE", defaults.lesson_max_page_size),
        }
    }
}
