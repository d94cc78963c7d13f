//! Wearline - Reconciliation and aggregation core for wearable daily metrics
//!
//! Wearline turns heterogeneous, partially-missing vendor records into a
//! consistent view for a fitness dashboard through a deterministic cycle:
//! session acquisition → sequential per-day fetch → record normalization →
//! daily series assembly, with a separate weekly aggregation of the
//! activity history.
//!
//! ## Modules
//!
//! - **raw / normalizer**: Reconcile one vendor day summary via alias precedence
//! - **series**: Assemble the ordered daily series, absorbing per-day failures
//! - **weekly**: Bucket activities into Monday-anchored training-volume weeks
//! - **session / client / refresh**: Retry-bounded login and snapshot orchestration

pub mod client;
pub mod error;
pub mod normalizer;
pub mod raw;
pub mod refresh;
pub mod series;
pub mod session;
pub mod types;
pub mod weekly;

pub use client::WearableClient;
pub use error::{FetchError, RefreshError};
pub use normalizer::{normalize, resolve, MetricKey};
pub use raw::RawDaySummary;
pub use refresh::{refresh_dashboard, RefreshOptions};
pub use series::build_daily_series;
pub use session::{acquire_session, Credentials, SessionBackend, SessionConfig};
pub use types::{
    ActivityRecord, DailySeries, DashboardSnapshot, NormalizedDayMetrics, WeeklyBucket,
};
pub use weekly::{aggregate_weekly, week_start_of};

/// Wearline version embedded in every snapshot
pub const WEARLINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name recorded in snapshot provenance
pub const PRODUCER_NAME: &str = "wearline";
