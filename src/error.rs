//! Error types for Wearline

use thiserror::Error;

/// Failure of a single external call at the vendor boundary.
///
/// Every query against the wearable cloud (login, per-day summary, activity
/// range) reports its failure as one of these named kinds, so calling code
/// can tell "the call never completed" apart from a genuine zero-valued
/// reading in a record that did arrive.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP status {status}")]
    Http { status: u16 },

    #[error("Failed to decode vendor payload: {0}")]
    Decode(String),

    #[error("No record for the requested key")]
    NotFound,
}

/// Failure of a whole dashboard refresh.
///
/// Per-day summary failures never appear here: the series builder absorbs
/// them as omitted days (partial coverage, not an error). A refresh only
/// fails as a whole when no session could be acquired or when the one-shot
/// activity-range fetch fails.
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("Session unavailable after {attempts} login attempts: {last_error}")]
    SessionUnavailable {
        attempts: u32,
        last_error: FetchError,
    },

    #[error("Activity range fetch failed: {0}")]
    ActivityFetch(FetchError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
