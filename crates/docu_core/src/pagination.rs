//! Catalog pagination parameters

use serde::{Deserialize, Serialize};

/// Largest page the backend is asked for
pub const MAX_LIMIT: i64 = 1000;

/// Page size used when the caller gives none
pub const DEFAULT_LIMIT: i64 = 100;

/// A normalized `limit`/`offset` pair
///
/// Constructed only through [`PageRequest::new`], so `1 <= limit <= 1000`
/// and `offset >= 0` always hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: i64,
    pub offset: i64,
}

impl PageRequest {
    /// The whole catalog as used for document validation
    pub const FULL_CATALOG: PageRequest = PageRequest {
        limit: MAX_LIMIT,
        offset: 0,
    };

    /// Clamp raw caller input; out-of-range values are corrected, never rejected
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            offset: offset.max(0),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_LIMIT, 0)
    }
}
