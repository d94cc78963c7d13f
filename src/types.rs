//! Core types for the Wearline pipeline
//!
//! This module defines the data structures that flow through a dashboard
//! refresh: normalized per-day metrics, the ordered daily series, activity
//! records, weekly training-volume buckets, and the immutable snapshot that
//! bundles one refresh's output.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reconciled metrics for one calendar day.
///
/// Produced once per raw record by the normalizer and immutable thereafter.
/// `None` is the "unknown" sentinel for metrics whose alias chain resolved
/// to nothing usable; counters default to 0 instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedDayMetrics {
    /// Calendar date, unique within a series
    pub date: NaiveDate,
    /// Step count, 0 when absent
    pub steps: u64,
    /// Body Battery (vendor 0-100 energy score), unknown when absent
    pub body_battery: Option<u8>,
    /// Resting heart rate (bpm), unknown when absent
    pub resting_heart_rate: Option<u32>,
    /// Average stress level (0-100), unknown when absent
    pub stress_level: Option<u8>,
    /// Sleep duration (seconds), 0 when absent
    pub sleep_seconds: u64,
}

impl NormalizedDayMetrics {
    /// All-defaults metrics for a date, what an empty raw record yields.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            steps: 0,
            body_battery: None,
            resting_heart_rate: None,
            stress_level: None,
            sleep_seconds: 0,
        }
    }

    /// Sleep duration in fractional hours.
    pub fn sleep_hours(&self) -> f64 {
        self.sleep_seconds as f64 / 3600.0
    }
}

/// Ordered daily metrics for a requested closed date range.
///
/// Strictly ascending by date, one entry per day that fetched successfully.
/// Days whose fetch failed are omitted, never inserted as placeholders, so
/// `len() < requested_days()` is the only signal of partial coverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    days: Vec<NormalizedDayMetrics>,
    requested_days: u32,
}

impl DailySeries {
    /// Assemble a series. Callers are expected to push entries in ascending
    /// date order; the series builder is the only production constructor.
    pub fn new(days: Vec<NormalizedDayMetrics>, requested_days: u32) -> Self {
        Self {
            days,
            requested_days,
        }
    }

    /// Entries in ascending date order.
    pub fn days(&self) -> &[NormalizedDayMetrics] {
        &self.days
    }

    /// Number of days the caller asked for (range length).
    pub fn requested_days(&self) -> u32 {
        self.requested_days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// True when every requested day fetched successfully.
    pub fn is_complete(&self) -> bool {
        self.days.len() as u32 == self.requested_days
    }

    /// Fraction of requested days present (0-1). A zero-day request counts
    /// as fully covered.
    pub fn coverage(&self) -> f64 {
        if self.requested_days == 0 {
            return 1.0;
        }
        self.days.len() as f64 / f64::from(self.requested_days)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NormalizedDayMetrics> {
        self.days.iter()
    }
}

impl<'a> IntoIterator for &'a DailySeries {
    type Item = &'a NormalizedDayMetrics;
    type IntoIter = std::slice::Iter<'a, NormalizedDayMetrics>;

    fn into_iter(self) -> Self::IntoIter {
        self.days.iter()
    }
}

/// One recorded activity from the vendor's activity list.
///
/// Read-only input to weekly aggregation; only the start timestamp and
/// duration drive bucketing, the rest is carried for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Vendor activity identifier
    pub activity_id: i64,
    /// Activity type tag (e.g., "running", "cycling")
    pub activity_type: Option<String>,
    /// Start timestamp in the user's local time
    pub start_time_local: NaiveDateTime,
    /// Duration (seconds)
    pub duration_sec: f64,
    /// Distance (meters)
    pub distance_m: Option<f64>,
    /// Average heart rate (bpm)
    pub avg_hr: Option<u32>,
}

/// Training volume for one Monday-anchored calendar week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyBucket {
    /// First day of the week, always a Monday
    pub week_start: NaiveDate,
    /// Summed activity duration (fractional hours, unrounded)
    pub total_hours: f64,
}

/// Immutable output of one dashboard refresh.
///
/// A later refresh produces a wholly new snapshot with a fresh
/// `snapshot_id`; snapshots are never mutated in place, so readers always
/// see a completed refresh and never a partially-built one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Unique identifier of this refresh
    pub snapshot_id: Uuid,
    /// Producing library name
    pub producer: String,
    /// Producing library version
    pub version: String,
    /// When this snapshot was computed (UTC)
    pub generated_at: DateTime<Utc>,
    /// Daily metrics over the requested history window
    pub daily: DailySeries,
    /// Weekly training-volume buckets, ascending by week start
    pub weekly: Vec<WeeklyBucket>,
}
