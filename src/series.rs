//! Daily series assembly
//!
//! Walks a closed date range oldest-to-newest, fetches each day's raw
//! summary through a caller-supplied fetch function, and normalizes the
//! results into an ordered [`DailySeries`]. A failing day is skipped, never
//! propagated: one bad day must not abort the whole range, and the caller
//! detects gaps by comparing series length against the requested range.

use chrono::NaiveDate;

use crate::error::FetchError;
use crate::normalizer::normalize;
use crate::raw::RawDaySummary;
use crate::types::DailySeries;

/// Build the daily series for `[start, end]`, both bounds inclusive.
///
/// Days are fetched strictly sequentially, one round-trip at a time, so
/// latency scales linearly with the range length. No retries happen here;
/// retry policy belongs to session acquisition. A reversed range
/// (`start > end`) is treated as an empty request, not an error.
pub fn build_daily_series<F>(mut fetch_day: F, start: NaiveDate, end: NaiveDate) -> DailySeries
where
    F: FnMut(NaiveDate) -> Result<RawDaySummary, FetchError>,
{
    if start > end {
        return DailySeries::new(Vec::new(), 0);
    }

    let requested_days = (end - start).num_days() as u32 + 1;
    let mut days = Vec::with_capacity(requested_days as usize);

    for date in start.iter_days().take(requested_days as usize) {
        match fetch_day(date) {
            Ok(raw) => days.push(normalize(&raw, date)),
            // Absorbed as omission: the entry is simply not there.
            Err(_) => continue,
        }
    }

    DailySeries::new(days, requested_days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn fetch_ok(day: NaiveDate) -> Result<RawDaySummary, FetchError> {
        Ok(RawDaySummary::from_value(
            json!({"totalSteps": day.format("%d").to_string().parse::<u64>().unwrap() * 100}),
        ))
    }

    #[test]
    fn test_full_week_no_failures() {
        let series = build_daily_series(fetch_ok, date(15), date(21));
        assert_eq!(series.len(), 7);
        assert!(series.is_complete());
        let dates: Vec<NaiveDate> = series.iter().map(|m| m.date).collect();
        let expected: Vec<NaiveDate> = (15..=21).map(date).collect();
        assert_eq!(dates, expected);
    }

    #[test]
    fn test_failing_day_is_omitted() {
        let bad_day = date(17);
        let series = build_daily_series(
            |d| {
                if d == bad_day {
                    Err(FetchError::Http { status: 503 })
                } else {
                    fetch_ok(d)
                }
            },
            date(15),
            date(21),
        );

        assert_eq!(series.len(), 6);
        assert_eq!(series.requested_days(), 7);
        assert!(!series.is_complete());
        assert!(series.iter().all(|m| m.date != bad_day));

        // Still strictly ascending with the gap closed over.
        let dates: Vec<NaiveDate> = series.iter().map(|m| m.date).collect();
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_every_day_failing_yields_empty_series() {
        let series = build_daily_series(|_| Err(FetchError::NotFound), date(15), date(21));
        assert!(series.is_empty());
        assert_eq!(series.requested_days(), 7);
        assert!((series.coverage() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_day_range() {
        let series = build_daily_series(fetch_ok, date(15), date(15));
        assert_eq!(series.len(), 1);
        assert_eq!(series.days()[0].date, date(15));
        assert_eq!(series.days()[0].steps, 1500);
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let series = build_daily_series(fetch_ok, date(21), date(15));
        assert!(series.is_empty());
        assert_eq!(series.requested_days(), 0);
    }

    #[test]
    fn test_fetch_order_is_chronological() {
        let mut seen = Vec::new();
        build_daily_series(
            |d| {
                seen.push(d);
                fetch_ok(d)
            },
            date(15),
            date(18),
        );
        let expected: Vec<NaiveDate> = (15..=18).map(date).collect();
        assert_eq!(seen, expected);
    }
}
