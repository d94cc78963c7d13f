//! Refresh orchestration
//!
//! This module provides the public entry point for one dashboard refresh.
//! It runs the full cycle on a single logical thread: acquire a session
//! (the only retried step), walk the daily history range one sequential
//! fetch at a time, pull the activity range once, and bucket it weekly.
//! The result is an immutable [`DashboardSnapshot`]; a later refresh
//! supersedes it with a new snapshot rather than mutating it.

use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::client::WearableClient;
use crate::error::RefreshError;
use crate::series::build_daily_series;
use crate::session::{acquire_session, Credentials, SessionBackend, SessionConfig};
use crate::types::DashboardSnapshot;
use crate::weekly::aggregate_weekly;
use crate::{PRODUCER_NAME, WEARLINE_VERSION};

/// Windows covered by one refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshOptions {
    /// The day the refresh is anchored on (the history range ends here)
    pub today: NaiveDate,
    /// Length of the daily history window, `today` included
    pub history_days: u32,
    /// How far back to fetch activities for weekly bucketing
    pub activity_lookback_days: u32,
    /// Trailing weekly buckets to keep
    pub week_count: usize,
}

impl RefreshOptions {
    /// Default windows anchored on a given day: one week of daily history,
    /// 15 trailing weekly buckets fed by 16 weeks of activities.
    pub fn for_day(today: NaiveDate) -> Self {
        Self {
            today,
            history_days: 7,
            activity_lookback_days: 112,
            week_count: 15,
        }
    }

    fn history_start(&self) -> NaiveDate {
        self.today - Duration::days(i64::from(self.history_days.saturating_sub(1)))
    }

    fn activity_start(&self) -> NaiveDate {
        self.today - Duration::days(i64::from(self.activity_lookback_days))
    }
}

/// Run one full dashboard refresh.
///
/// Failure modes are deliberately asymmetric: session exhaustion and the
/// activity-range fetch fail the whole refresh, while individual daily
/// summaries that fail only lower `daily.coverage()`. A caller therefore
/// distinguishes "no data this cycle" (an `Err`) from "rendered with gaps"
/// (an `Ok` snapshot with incomplete coverage).
pub fn refresh_dashboard<B: SessionBackend>(
    backend: &B,
    credentials: &Credentials,
    session_config: &SessionConfig,
    options: &RefreshOptions,
) -> Result<DashboardSnapshot, RefreshError> {
    let client = acquire_session(backend, credentials, session_config)?;

    let daily = build_daily_series(
        |date| client.day_summary(date),
        options.history_start(),
        options.today,
    );

    let activities = client
        .activities(options.activity_start(), options.today)
        .map_err(RefreshError::ActivityFetch)?;
    let weekly = aggregate_weekly(&activities, options.week_count);

    Ok(DashboardSnapshot {
        snapshot_id: Uuid::new_v4(),
        producer: PRODUCER_NAME.to_string(),
        version: WEARLINE_VERSION.to_string(),
        generated_at: Utc::now(),
        daily,
        weekly,
    })
}
