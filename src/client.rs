//! Wearable vendor query surface
//!
//! The trait implemented by an authenticated vendor session. The core never
//! talks to the vendor cloud directly; everything it needs is behind these
//! two query methods. Each call is attempted exactly once — per-day failures
//! are absorbed by the series builder, range failures are surfaced to the
//! refresh, and retrying belongs to session acquisition only.

use chrono::NaiveDate;

use crate::error::FetchError;
use crate::raw::RawDaySummary;
use crate::types::ActivityRecord;

/// An authenticated handle permitting data queries against the wearable
/// source.
pub trait WearableClient {
    /// Fetch one calendar day's raw summary record.
    fn day_summary(&self, date: NaiveDate) -> Result<RawDaySummary, FetchError>;

    /// Fetch the activity list for a closed date range.
    fn activities(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ActivityRecord>, FetchError>;
}
