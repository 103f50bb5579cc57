//! Series derivation for the dashboard charts.
//!
//! Dates stay as the `YYYY-MM-DD` text the server sends, so ordering them as
//! strings is chronological.

use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

use crate::models::ProgressRecord;

/// Number of progression records on one day
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateCount {
    pub date: String,
    pub count: u64,
}

/// Heaviest weight lifted on one day
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressPoint {
    pub date: String,
    pub weight: f64,
}

pub fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Count records per date across every exercise, keeping only dates inside the
/// trailing window: strictly after `today - window_days`. A window reaching
/// past the calendar's range keeps every dated record.
pub fn frequency_counts<'a, I>(records: I, today: NaiveDate, window_days: i64) -> Vec<DateCount>
where
    I: IntoIterator<Item = &'a ProgressRecord>,
{
    let cutoff = Duration::try_days(window_days).and_then(|span| today.checked_sub_signed(span));
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();

    for record in records {
        match parse_date(&record.date) {
            Some(date) if cutoff.map_or(true, |cutoff| date > cutoff) => *counts.entry(record.date.as_str()).or_default() += 1,
            Some(_) => {}
            None => tracing::debug!("Skipping record with unreadable date {:?}", record.date),
        }
    }

    counts
        .into_iter()
        .map(|(date, count)| DateCount {
            date: date.to_string(),
            count,
        })
        .collect()
}

/// Reduce records to the maximum weight per date, ascending by date
pub fn max_weight_per_day(records: &[ProgressRecord]) -> Vec<ProgressPoint> {
    let mut best: BTreeMap<&str, f64> = BTreeMap::new();

    for record in records {
        best.entry(record.date.as_str())
            .and_modify(|weight| *weight = weight.max(record.weight))
            .or_insert(record.weight);
    }

    best.into_iter()
        .map(|(date, weight)| ProgressPoint {
            date: date.to_string(),
            weight,
        })
        .collect()
}

/// Axis label `dd/mm` for an ISO date; anything else is shown unchanged
pub fn day_month_label(date: &str) -> String {
    let parts: Vec<&str> = date.split('-').collect();
    match parts.as_slice() {
        [_, month, day] => format!("{}/{}", day, month),
        _ => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, weight: f64) -> ProgressRecord {
        ProgressRecord {
            date: date.to_string(),
            weight,
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_frequency_keeps_only_trailing_window() {
        let records = vec![
            record("2024-01-01", 50.0),
            record("2024-01-01", 60.0),
            record("2024-02-15", 55.0),
        ];

        let counts = frequency_counts(&records, ymd(2024, 2, 20), 30);

        assert_eq!(
            counts,
            vec![DateCount {
                date: "2024-02-15".to_string(),
                count: 1
            }]
        );
    }

    #[test]
    fn test_frequency_counts_across_exercises_sorted() {
        let squat = vec![record("2024-02-19", 80.0), record("2024-02-10", 75.0)];
        let bench = vec![record("2024-02-19", 60.0), record("not-a-date", 1.0)];

        let counts = frequency_counts(squat.iter().chain(bench.iter()), ymd(2024, 2, 20), 30);

        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].date, "2024-02-10");
        assert_eq!(counts[0].count, 1);
        assert_eq!(counts[1].date, "2024-02-19");
        assert_eq!(counts[1].count, 2);
    }

    #[test]
    fn test_frequency_window_boundary() {
        // Exactly 30 days back is outside, 29 days back is inside
        let records = vec![record("2024-01-21", 1.0), record("2024-01-22", 1.0)];
        let counts = frequency_counts(&records, ymd(2024, 2, 20), 30);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].date, "2024-01-22");
    }

    #[test]
    fn test_frequency_oversized_window_keeps_everything() {
        let records = vec![record("1999-12-31", 1.0), record("2024-02-19", 1.0)];

        let counts = frequency_counts(&records, ymd(2024, 2, 20), 100_000_000);
        assert_eq!(counts.len(), 2);

        let counts = frequency_counts(&records, ymd(2024, 2, 20), i64::MAX);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_max_weight_per_day() {
        let records = vec![
            record("2024-01-01", 50.0),
            record("2024-01-01", 60.0),
            record("2024-01-05", 55.0),
        ];

        assert_eq!(
            max_weight_per_day(&records),
            vec![
                ProgressPoint {
                    date: "2024-01-01".to_string(),
                    weight: 60.0
                },
                ProgressPoint {
                    date: "2024-01-05".to_string(),
                    weight: 55.0
                },
            ]
        );
    }

    #[test]
    fn test_max_weight_sorts_unordered_input() {
        let records = vec![record("2024-03-02", 40.0), record("2024-02-28", 45.0)];
        let points = max_weight_per_day(&records);
        assert_eq!(points[0].date, "2024-02-28");
        assert_eq!(points[1].date, "2024-03-02");
        assert!(max_weight_per_day(&[]).is_empty());
    }

    #[test]
    fn test_day_month_label() {
        assert_eq!(day_month_label("2024-02-15"), "15/02");
        assert_eq!(day_month_label("someday"), "someday");
    }
}
