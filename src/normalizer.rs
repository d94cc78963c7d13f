//! Record normalization
//!
//! This module reconciles one raw vendor day summary into fixed
//! [`NormalizedDayMetrics`]:
//! - Each metric is resolved through a declarative alias precedence list
//! - First present-and-usable alias wins; falsy values fall through
//! - Exhausted chains take the metric's documented default
//!
//! The vendor has renamed these fields across firmware and API versions
//! (a step count may arrive as `totalSteps` or `dailySteps` depending on
//! the account); the precedence table keeps that drift in one place.

use chrono::NaiveDate;

use crate::raw::{usable_number, RawDaySummary};
use crate::types::NormalizedDayMetrics;

/// Canonical metric identifiers recognized by the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKey {
    Steps,
    BodyBattery,
    RestingHeartRate,
    StressLevel,
    SleepSeconds,
}

impl MetricKey {
    /// Alternate vendor keys for this metric, in precedence order.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            MetricKey::Steps => &["totalSteps", "dailySteps", "steps"],
            MetricKey::BodyBattery => &[
                "bodyBatteryMostRecentValue",
                "bodyBatteryHighestValue",
                "bodyBattery",
            ],
            MetricKey::RestingHeartRate => &["restingHeartRate", "currentDayRestingHeartRate"],
            MetricKey::StressLevel => &["averageStressLevel", "avgStressLevel", "stressLevel"],
            MetricKey::SleepSeconds => &[
                "sleepingSeconds",
                "sleepTimeSeconds",
                "measurableAsleepDuration",
            ],
        }
    }
}

/// Resolve one metric against a raw record.
///
/// Consults the alias list in order and returns the first usable reading,
/// or `None` when every alias is absent or falsy. Malformed values are
/// silently treated as absent; resolution has no error conditions.
pub fn resolve(raw: &RawDaySummary, key: MetricKey) -> Option<f64> {
    key.aliases()
        .iter()
        .filter_map(|alias| raw.get(alias))
        .find_map(usable_number)
}

/// Normalize a raw day summary into fixed daily metrics.
///
/// Pure and total: the same record always yields the same output, and no
/// input can make it fail. Counters default to 0, rates and levels to
/// unknown. Out-of-range readings are clamped to their documented scales
/// rather than rejected.
pub fn normalize(raw: &RawDaySummary, date: NaiveDate) -> NormalizedDayMetrics {
    NormalizedDayMetrics {
        date,
        steps: resolve(raw, MetricKey::Steps)
            .map(|n| n.max(0.0) as u64)
            .unwrap_or(0),
        body_battery: resolve(raw, MetricKey::BodyBattery).map(|n| n.clamp(0.0, 100.0) as u8),
        resting_heart_rate: resolve(raw, MetricKey::RestingHeartRate)
            .filter(|n| *n > 0.0)
            .map(|n| n as u32),
        stress_level: resolve(raw, MetricKey::StressLevel).map(|n| n.clamp(0.0, 100.0) as u8),
        sleep_seconds: resolve(raw, MetricKey::SleepSeconds)
            .map(|n| n.max(0.0) as u64)
            .unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn raw(value: serde_json::Value) -> RawDaySummary {
        RawDaySummary::from_value(value)
    }

    #[test]
    fn test_primary_key_wins() {
        let record = raw(json!({"totalSteps": 8500, "dailySteps": 4200}));
        let metrics = normalize(&record, date());
        assert_eq!(metrics.steps, 8500);
    }

    #[test]
    fn test_alias_fallback_when_primary_absent() {
        let record = raw(json!({"dailySteps": 4200}));
        let metrics = normalize(&record, date());
        assert_eq!(metrics.steps, 4200);
    }

    #[test]
    fn test_falsy_primary_falls_through() {
        // A zero primary is indistinguishable from "not reported" in the
        // vendor payloads, so it falls through like an absent key.
        let record = raw(json!({"totalSteps": 0, "dailySteps": 4200}));
        let metrics = normalize(&record, date());
        assert_eq!(metrics.steps, 4200);
    }

    #[test]
    fn test_empty_record_yields_defaults() {
        let metrics = normalize(&raw(json!({})), date());
        assert_eq!(metrics, NormalizedDayMetrics::empty(date()));
    }

    #[test]
    fn test_unknown_sentinels_for_rates_and_levels() {
        let record = raw(json!({"totalSteps": 100, "restingHeartRate": null}));
        let metrics = normalize(&record, date());
        assert_eq!(metrics.body_battery, None);
        assert_eq!(metrics.resting_heart_rate, None);
        assert_eq!(metrics.stress_level, None);
    }

    #[test]
    fn test_all_metrics_resolved_together() {
        let record = raw(json!({
            "dailySteps": 4200,
            "bodyBatteryMostRecentValue": 62,
            "restingHeartRate": 55,
            "averageStressLevel": 31,
            "sleepingSeconds": 25200
        }));
        let metrics = normalize(&record, date());
        assert_eq!(
            metrics,
            NormalizedDayMetrics {
                date: date(),
                steps: 4200,
                body_battery: Some(62),
                resting_heart_rate: Some(55),
                stress_level: Some(31),
                sleep_seconds: 25200,
            }
        );
    }

    #[test]
    fn test_out_of_range_values_clamped() {
        let record = raw(json!({"bodyBattery": 140, "averageStressLevel": -5}));
        let metrics = normalize(&record, date());
        assert_eq!(metrics.body_battery, Some(100));
        // -5 is truthy (nonzero) so it resolves, then clamps to the floor.
        assert_eq!(metrics.stress_level, Some(0));
    }

    #[test]
    fn test_numeric_string_reading() {
        let record = raw(json!({"restingHeartRate": "58"}));
        let metrics = normalize(&record, date());
        assert_eq!(metrics.resting_heart_rate, Some(58));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let record = raw(json!({"dailySteps": 4200, "stressLevel": 40}));
        let first = normalize(&record, date());
        let second = normalize(&record, date());
        assert_eq!(first, second);
    }
}
