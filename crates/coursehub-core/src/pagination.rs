//! Pagination utilities for list endpoints.
//!
//! Page-based pagination with a bounded page size:
//! - `page`: Page number (1-indexed, default: 1)
//! - `page_size`: Items per page (default and maximum come from [`PageBounds`])
//!
//! The generic `limit` / `offset` pair is accepted as well. `page_size` takes
//! precedence over `limit`, and `page` takes precedence over `offset`.
//!
//! # Example
//!
//! ```ignore
//! use coursehub_core::pagination::{LessonPaginator, PaginationParams};
//!
//! let paginator = LessonPaginator::default();
//! let window = paginator.window(&params);
//!
//! let lessons = fetch_lessons(window.limit, window.offset).await?;
//! let total = count_lessons().await?;
//!
//! let meta = paginator.meta(&window, total);
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Deserializes an optional string into an optional i64.
///
/// Query parameters arrive as strings; empty strings are treated as `None`.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Metadata about a paginated response.
///
/// ```json
/// {
///   "data": [...],
///   "meta": {
///     "total": 100,
///     "limit": 10,
///     "offset": 20,
///     "page": 3,
///     "has_more": true
///   }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of items across all pages
    pub total: i64,
    /// Page size that was applied
    pub limit: i64,
    /// Number of items skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// Current page number (only present if page-based pagination was used)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    /// Whether there are more items after this page
    pub has_more: bool,
}

/// Query parameters for pagination.
#[derive(Debug, Clone, Default, Hash, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (1-indexed, default: 1)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    /// Items per page, clamped to the endpoint maximum
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page_size: Option<i64>,
    /// Alias of `page_size` for offset-based clients
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub limit: Option<i64>,
    /// Number of items to skip (ignored if `page` is set)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub offset: Option<i64>,
}

/// Default and maximum page size for an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageBounds {
    pub default_size: i64,
    pub max_size: i64,
}

impl PageBounds {
    /// Bounds are normalised so that `1 <= default_size <= max_size`.
    #[must_use]
    pub fn new(default_size: i64, max_size: i64) -> Self {
        let max_size = max_size.max(1);
        Self {
            default_size: default_size.clamp(1, max_size),
            max_size,
        }
    }
}

/// The slice of rows a request asks for, after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: i64,
    pub offset: i64,
    pub page: Option<i64>,
}

impl PaginationParams {
    /// Returns the effective page size, clamped to `[1, bounds.max_size]`.
    #[must_use]
    pub fn limit(&self, bounds: &PageBounds) -> i64 {
        self.page_size
            .or(self.limit)
            .unwrap_or(bounds.default_size)
            .clamp(1, bounds.max_size)
    }

    /// Returns the effective offset, derived from `page` when present.
    /// Saturates at `i64::MAX` for absurd page numbers.
    #[must_use]
    pub fn offset(&self, bounds: &PageBounds) -> i64 {
        if let Some(page) = self.page {
            (page.max(1) - 1).saturating_mul(self.limit(bounds))
        } else {
            self.offset.unwrap_or(0).max(0)
        }
    }

    /// Returns the page number if provided, clamped to a minimum of 1.
    #[must_use]
    pub fn page(&self) -> Option<i64> {
        self.page.map(|p| p.max(1))
    }
}

/// Paginator for lesson listings.
///
/// Ten lessons per page unless the client asks otherwise, never more than
/// fifty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LessonPaginator {
    bounds: PageBounds,
}

impl LessonPaginator {
    pub const DEFAULT_PAGE_SIZE: i64 = 10;
    pub const MAX_PAGE_SIZE: i64 = 50;

    #[must_use]
    pub fn new(bounds: PageBounds) -> Self {
        Self { bounds }
    }

    #[must_use]
    pub fn bounds(&self) -> PageBounds {
        self.bounds
    }

    /// Resolves the requested window. Requests without `page` or `offset`
    /// are treated as page 1.
    #[must_use]
    pub fn window(&self, params: &PaginationParams) -> PageWindow {
        let page = match (params.page(), params.offset) {
            (None, None) => Some(1),
            (page, _) => page,
        };

        PageWindow {
            limit: params.limit(&self.bounds),
            offset: params.offset(&self.bounds),
            page,
        }
    }

    #[must_use]
    pub fn meta(&self, window: &PageWindow, total: i64) -> PaginationMeta {
        PaginationMeta {
            total,
            limit: window.limit,
            offset: Some(window.offset),
            page: window.page,
            has_more: window.offset.saturating_add(window.limit) < total,
        }
    }
}

impl Default for LessonPaginator {
    fn default() -> Self {
        Self::new(PageBounds::new(Self::DEFAULT_PAGE_SIZE, Self::MAX_PAGE_SIZE))
    }
}
