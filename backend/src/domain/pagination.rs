//! # Cursor Pagination
//!
//! Lists are ordered by `id` ascending. A page request carries a size and an
//! optional cursor (`starting_after`), the ID of the last item the caller has
//! already seen. The next page holds the first `limit` items whose ID is
//! strictly greater than the cursor; an empty page means the end.
//!
//! Cursors are opaque and never checked against existing records. A cursor
//! that matches nothing still has a position in the ordering, so paging simply
//! resumes from that position.
//!
//! The SQL side of this contract lives in [`crate::storage::keyset`].

use crate::domain::error::{DomainError, DomainResult, FieldSource};

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size bounds applied to every list request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    default_limit: u32,
    max_limit: u32,
}

impl PageLimits {
    /// Returns `None` unless `1 <= default_limit <= max_limit`
    pub fn new(default_limit: u32, max_limit: u32) -> Option<Self> {
        if default_limit == 0 || default_limit > max_limit {
            return None;
        }
        Some(Self {
            default_limit,
            max_limit,
        })
    }

    pub fn default_limit(&self) -> u32 {
        self.default_limit
    }

    pub fn max_limit(&self) -> u32 {
        self.max_limit
    }
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_PAGE_SIZE,
            max_limit: MAX_PAGE_SIZE,
        }
    }
}

/// A validated request for one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    limit: u32,
    starting_after: Option<String>,
}

impl PageRequest {
    /// Validate raw list parameters. An out-of-range `limit` is rejected, not
    /// clamped. An empty cursor means the first page.
    pub fn new(
        limits: &PageLimits,
        limit: Option<i64>,
        starting_after: Option<String>,
    ) -> DomainResult<Self> {
        let limit = match limit {
            None => limits.default_limit,
            Some(value) if (1..=i64::from(limits.max_limit)).contains(&value) => value as u32,
            Some(value) => {
                return Err(DomainError::invalid(
                    FieldSource::Query,
                    "limit",
                    format!(
                        "must be between 1 and {}, got {}",
                        limits.max_limit, value
                    ),
                ))
            }
        };

        Ok(Self {
            limit,
            starting_after: starting_after.filter(|cursor| !cursor.is_empty()),
        })
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn starting_after(&self) -> Option<&str> {
        self.starting_after.as_deref()
    }
}
