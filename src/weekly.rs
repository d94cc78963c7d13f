//! Weekly training-volume aggregation
//!
//! Buckets activities into Monday-anchored calendar weeks and sums their
//! duration as fractional hours. The covered span is contiguous: every week
//! between the earliest and latest activity appears exactly once, zero-hour
//! weeks included, so a trailing window is a true suffix of the timeline
//! rather than a filter that hides quiet weeks.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate};

use crate::types::{ActivityRecord, WeeklyBucket};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// The Monday on or before `date`. A Monday maps to itself, so an activity
/// starting exactly on a Monday belongs to that week, not the prior one.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Aggregate activities into the trailing `week_count` weekly buckets.
///
/// Buckets are ascending by week start and contiguous over the span from
/// the earliest to the latest activity; weeks with no recorded activity
/// appear with `total_hours = 0`. Hours keep full fractional precision —
/// rounding is a display concern. An empty activity list yields an empty
/// result.
pub fn aggregate_weekly(activities: &[ActivityRecord], week_count: usize) -> Vec<WeeklyBucket> {
    let mut hours_by_week: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for activity in activities {
        let week = week_start_of(activity.start_time_local.date());
        *hours_by_week.entry(week).or_insert(0.0) += activity.duration_sec / SECONDS_PER_HOUR;
    }

    let (Some((&first_week, _)), Some((&last_week, _))) = (
        hours_by_week.first_key_value(),
        hours_by_week.last_key_value(),
    ) else {
        return Vec::new();
    };

    // Contiguous Monday sequence over the whole span, zero-filling gaps.
    let mut buckets = Vec::new();
    let mut week = first_week;
    while week <= last_week {
        buckets.push(WeeklyBucket {
            week_start: week,
            total_hours: hours_by_week.get(&week).copied().unwrap_or(0.0),
        });
        week += Duration::days(7);
    }

    if buckets.len() > week_count {
        buckets.drain(..buckets.len() - week_count);
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn activity(id: i64, start: &str, duration_sec: f64) -> ActivityRecord {
        ActivityRecord {
            activity_id: id,
            activity_type: Some("running".to_string()),
            start_time_local: NaiveDateTime::parse_from_str(start, "%Y-%m-%d %H:%M:%S").unwrap(),
            duration_sec,
            distance_m: None,
            avg_hr: None,
        }
    }

    fn monday(d: u32) -> NaiveDate {
        let date = NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        assert_eq!(date.weekday().num_days_from_monday(), 0);
        date
    }

    #[test]
    fn test_week_start_of_mid_week() {
        // 2024-01-18 is a Thursday
        let date = NaiveDate::from_ymd_opt(2024, 1, 18).unwrap();
        assert_eq!(week_start_of(date), monday(15));
    }

    #[test]
    fn test_week_start_of_monday_is_itself() {
        assert_eq!(week_start_of(monday(15)), monday(15));
    }

    #[test]
    fn test_same_week_durations_summed() {
        // Both start Monday 2024-01-15: 1800s + 3600s = 1.5h
        let activities = vec![
            activity(1, "2024-01-15 07:00:00", 1800.0),
            activity(2, "2024-01-15 18:30:00", 3600.0),
        ];
        let buckets = aggregate_weekly(&activities, 15);
        assert_eq!(buckets.len(), 1);
        assert_eq!(buckets[0].week_start, monday(15));
        assert!((buckets[0].total_hours - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_middle_week_is_zero_filled() {
        let activities = vec![
            activity(1, "2024-01-03 07:00:00", 3600.0),  // week of Jan 1
            activity(2, "2024-01-18 07:00:00", 7200.0),  // week of Jan 15
        ];
        let buckets = aggregate_weekly(&activities, 15);
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].week_start, monday(1));
        assert_eq!(buckets[1].week_start, monday(8));
        assert_eq!(buckets[2].week_start, monday(15));
        assert_eq!(buckets[1].total_hours, 0.0);
    }

    #[test]
    fn test_trailing_window_is_a_suffix() {
        // 5-week span with activity only in weeks 1, 3, and 5.
        let activities = vec![
            activity(1, "2024-01-01 07:00:00", 3600.0),
            activity(2, "2024-01-17 07:00:00", 3600.0),
            activity(3, "2024-01-29 07:00:00", 3600.0),
        ];
        let buckets = aggregate_weekly(&activities, 2);
        // Last 2 contiguous weeks: Jan 22 (empty) and Jan 29 — not the two
        // most recent weeks that happened to have activity.
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].week_start, monday(22));
        assert_eq!(buckets[0].total_hours, 0.0);
        assert_eq!(buckets[1].week_start, monday(29));
        assert!((buckets[1].total_hours - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_window_larger_than_span() {
        let activities = vec![activity(1, "2024-01-15 07:00:00", 1800.0)];
        let buckets = aggregate_weekly(&activities, 15);
        assert_eq!(buckets.len(), 1);
    }

    #[test]
    fn test_no_activities_yields_empty() {
        assert!(aggregate_weekly(&[], 15).is_empty());
    }

    #[test]
    fn test_sunday_belongs_to_preceding_monday() {
        // 2024-01-21 is the Sunday closing the week of Jan 15.
        let activities = vec![
            activity(1, "2024-01-15 07:00:00", 1800.0),
            activity(2, "2024-01-21 23:59:59", 1800.0),
        ];
        let buckets = aggregate_weekly(&activities, 15);
        assert_eq!(buckets.len(), 1);
        assert!((buckets[0].total_hours - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fractional_hours_not_rounded() {
        let activities = vec![activity(1, "2024-01-15 07:00:00", 1000.0)];
        let buckets = aggregate_weekly(&activities, 15);
        assert!((buckets[0].total_hours - 1000.0 / 3600.0).abs() < 1e-12);
    }
}
