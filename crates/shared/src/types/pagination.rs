//! Offset pagination for list endpoints.

use serde::{Deserialize, Serialize};

/// A resolved `limit`/`offset` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetPage {
    /// Maximum number of rows to return.
    pub limit: u64,
    /// Number of rows to skip.
    pub offset: u64,
}

/// Errors produced while resolving pagination parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
    /// `limit` was zero or negative.
    #[error("limit must be greater than 0")]
    NonPositiveLimit,
    /// `offset` was negative.
    #[error("offset must not be negative")]
    NegativeOffset,
}

impl OffsetPage {
    /// Resolves raw query parameters into a page window.
    ///
    /// A missing limit falls back to `default_limit`; any limit is clamped to
    /// `max_limit`. A missing offset means 0.
    pub fn resolve(
        limit: Option<i64>,
        offset: Option<i64>,
        default_limit: u64,
        max_limit: u64,
    ) -> Result<Self, PageError> {
        let limit = match limit {
            None => default_limit,
            Some(l) if l <= 0 => return Err(PageError::NonPositiveLimit),
            Some(l) => l.unsigned_abs(),
        };
        let offset = match offset {
            None => 0,
            Some(o) if o < 0 => return Err(PageError::NegativeOffset),
            Some(o) => o.unsigned_abs(),
        };

        Ok(Self {
            limit: limit.min(max_limit),
            offset,
        })
    }
}

#[cfg(test)]
#[path = "pagination_tests.rs"]
mod tests;
