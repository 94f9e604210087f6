//! Shared pagination types for API query parameters.
//!
//! All list endpoints use page-based pagination with `page` and `limit`
//! parameters, and return a `pagination` block alongside the data:
//! `{page, limit, total, pages}`.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};

/// Default number of items to return per page.
pub const DEFAULT_LIMIT: i64 = 10;

/// Maximum number of items that can be requested per page.
pub const MAX_LIMIT: i64 = 100;

/// Standard pagination parameters for list endpoints.
///
/// - `page`: 1-based page number (default: 1)
/// - `limit`: Maximum items to return (default: 10, max: 100)
///
/// The `limit` is clamped to ensure it's always between 1 and 100,
/// preventing both zero-result queries and excessive data fetching.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    /// Page number, starting from 1 (default: 1)
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub page: Option<i64>,

    /// Maximum number of items to return (default: 10, max: 100)
    #[serde_as(as = "Option<DisplayFromStr>")]
    pub limit: Option<i64>,
}

impl Pagination {
    /// Get the page value, defaulting to 1 and never below 1.
    #[inline]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Get the limit value, clamped between 1 and MAX_LIMIT.
    /// Defaults to DEFAULT_LIMIT if not specified.
    #[inline]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Row offset derived from page and limit.
    #[inline]
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }

    /// Get both offset and limit as a tuple, useful for destructuring.
    #[inline]
    pub fn params(&self) -> (i64, i64) {
        (self.offset(), self.limit())
    }
}

/// Pagination metadata returned in list response envelopes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number (1-based)
    pub page: i64,
    /// Items per page
    pub limit: i64,
    /// Total number of items matching the query (before pagination)
    pub total: i64,
    /// Total number of pages
    pub pages: i64,
}

impl PageMeta {
    /// Build page metadata from the request parameters and a total count.
    pub fn new(pagination: &Pagination, total: i64) -> Self {
        let limit = pagination.limit();
        Self {
            page: pagination.page(),
            limit,
            total,
            pages: (total + limit - 1) / limit.max(1),
        }
    }
}
