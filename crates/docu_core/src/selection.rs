//! Content retrieval mode selection

/// Word offset used when single-range mode is chosen without `start`
pub const DEFAULT_START: i64 = 0;

/// Slice length used when single-range mode is chosen without `max_length`
pub const DEFAULT_MAX_LENGTH: i64 = 10_000;

/// Upper bound for a single slice
pub const MAX_LENGTH_CAP: i64 = 50_000;

/// How `fetch_doc_content` addresses the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeSelection {
    /// Structural overview, no positional parameters
    Index,

    /// One contiguous slice, already clamped
    Single { start: i64, max_length: i64 },

    /// Several `start-end` pairs, forwarded verbatim
    Multi { ranges: String },
}

impl RangeSelection {
    /// Pick the mode from which optional parameters were supplied
    ///
    /// `ranges` wins over everything; an empty `ranges` string counts as absent.
    /// Defaults are filled in before clamping.
    pub fn select(start: Option<i64>, max_length: Option<i64>, ranges: Option<String>) -> Self {
        if let Some(ranges) = ranges.filter(|r| !r.is_empty()) {
            return RangeSelection::Multi { ranges };
        }

        if start.is_none() && max_length.is_none() {
            return RangeSelection::Index;
        }

        RangeSelection::Single {
            start: start.unwrap_or(DEFAULT_START).max(0),
            max_length: max_length
                .unwrap_or(DEFAULT_MAX_LENGTH)
                .clamp(1, MAX_LENGTH_CAP),
        }
    }

    /// Short mode name for logs
    pub fn mode(&self) -> &'static str {
        match self {
            RangeSelection::Index => "index",
            RangeSelection::Single { .. } => "single",
            RangeSelection::Multi { .. } => "multi",
        }
    }
}
