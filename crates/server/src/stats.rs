//! # Dashboard Aggregation Primitives
//!
//! Pure building blocks for the dashboard endpoints: the growth
//! percentage rule, time-series bucketing, and the recent-activity
//! merge. Handlers fetch rows; everything here is deterministic and
//! unit-tested.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};

use crate::dto::dashboard::ActivityItem;

/// Time window selector for the dashboard series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    /// 7 daily buckets
    Week,
    /// 30 daily buckets
    Month,
    /// 12 monthly buckets
    Year,
}

impl TimeRange {
    /// Parse the `timeRange` query parameter. Unknown values fall back to `Week`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "week" => Some(TimeRange::Week),
            "month" => Some(TimeRange::Month),
            "year" => Some(TimeRange::Year),
            _ => None,
        }
    }

    /// Fixed number of buckets for this range.
    pub fn bucket_count(self) -> usize {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Year => 12,
        }
    }

    /// Inclusive start of the oldest bucket.
    pub fn window_start(self, now: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            TimeRange::Week | TimeRange::Month => {
                let days = self.bucket_count() as i64 - 1;
                let first_day = now.date_naive() - Duration::days(days);
                first_day.and_time(NaiveTime::MIN).and_utc()
            },
            TimeRange::Year => {
                let (year, month) = shift_month(now.date_naive(), -11);
                NaiveDate::from_ymd_opt(year, month, 1)
                    .map(|d| d.and_time(NaiveTime::MIN).and_utc())
                    .unwrap_or(now)
            },
        }
    }

    /// Labels for each bucket, oldest first.
    pub fn bucket_labels(self, now: DateTime<Utc>) -> Vec<String> {
        match self {
            TimeRange::Week | TimeRange::Month => {
                let days = self.bucket_count() as i64;
                let first_day = now.date_naive() - Duration::days(days - 1);
                (0 .. days)
                    .map(|offset| (first_day + Duration::days(offset)).format("%Y-%m-%d").to_string())
                    .collect()
            },
            TimeRange::Year => {
                (0 .. 12)
                    .map(|back| {
                        let (year, month) = shift_month(now.date_naive(), back - 11);
                        format!("{:04}-{:02}", year, month)
                    })
                    .collect()
            },
        }
    }

    /// Bucket index for a timestamp, or `None` when it falls outside the window.
    pub fn bucket_index(self, now: DateTime<Utc>, ts: DateTime<Utc>) -> Option<usize> {
        match self {
            TimeRange::Week | TimeRange::Month => {
                let count = self.bucket_count() as i64;
                let first_day = now.date_naive() - Duration::days(count - 1);
                let offset = (ts.date_naive() - first_day).num_days();
                (0 .. count).contains(&offset).then_some(offset as usize)
            },
            TimeRange::Year => {
                let offset = month_ordinal(ts.date_naive()) - month_ordinal(now.date_naive()) + 11;
                (0 .. 12).contains(&offset).then_some(offset as usize)
            },
        }
    }
}

/// Months since year zero, for monthly bucket arithmetic.
fn month_ordinal(date: NaiveDate) -> i64 { date.year() as i64 * 12 + date.month0() as i64 }

/// Shift a date by whole months, returning (year, month).
fn shift_month(date: NaiveDate, months: i64) -> (i32, u32) {
    let ordinal = month_ordinal(date) + months;
    (
        ordinal.div_euclid(12) as i32,
        ordinal.rem_euclid(12) as u32 + 1,
    )
}

/// Relative change between a current and previous period count.
///
/// `previous == 0` is special-cased: 100 when anything appeared this
/// period, 0 when both periods are empty.
pub fn calculate_growth(current: u64, previous: u64) -> i64 {
    if previous == 0 {
        if current > 0 {
            100
        }
        else {
            0
        }
    }
    else {
        let ratio = (current as f64 - previous as f64) / previous as f64;
        (ratio * 100.0).round() as i64
    }
}

/// Count timestamps into the fixed buckets of a range.
pub fn bucket_counts(range: TimeRange, now: DateTime<Utc>, timestamps: &[DateTime<Utc>]) -> Vec<u64> {
    let mut counts = vec![0u64; range.bucket_count()];
    for ts in timestamps {
        if let Some(index) = range.bucket_index(now, *ts) {
            counts[index] += 1;
        }
    }
    counts
}

/// Merge per-table recent rows into one feed: newest first, hard cap.
pub fn merge_recent_activity(mut items: Vec<ActivityItem>, cap: usize) -> Vec<ActivityItem> {
    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    items.truncate(cap);
    items
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use uuid::Uuid;

    use super::*;

    fn noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_calculate_growth_zero_previous() {
        assert_eq!(calculate_growth(10, 0), 100);
        assert_eq!(calculate_growth(0, 0), 0);
    }

    #[test]
    fn test_calculate_growth_positive() {
        assert_eq!(calculate_growth(15, 10), 50);
    }

    #[test]
    fn test_calculate_growth_negative() {
        assert_eq!(calculate_growth(5, 10), -50);
    }

    #[test]
    fn test_calculate_growth_rounds() {
        // 1/3 growth rounds to 33
        assert_eq!(calculate_growth(4, 3), 33);
        // 2/3 growth rounds to 67
        assert_eq!(calculate_growth(5, 3), 67);
    }

    #[test]
    fn test_time_range_parse() {
        assert_eq!(TimeRange::parse("week"), Some(TimeRange::Week));
        assert_eq!(TimeRange::parse("month"), Some(TimeRange::Month));
        assert_eq!(TimeRange::parse("year"), Some(TimeRange::Year));
        assert_eq!(TimeRange::parse("decade"), None);
    }

    #[test]
    fn test_bucket_counts_week() {
        let now = noon(2026, 7, 14);
        let timestamps = vec![
            noon(2026, 7, 14), // today, last bucket
            noon(2026, 7, 14),
            noon(2026, 7, 8), // 6 days ago, first bucket
            noon(2026, 7, 1), // outside the window
        ];

        let counts = bucket_counts(TimeRange::Week, now, &timestamps);
        assert_eq!(counts.len(), 7);
        assert_eq!(counts[0], 1);
        assert_eq!(counts[6], 2);
        assert_eq!(counts.iter().sum::<u64>(), 3);
    }

    #[test]
    fn test_bucket_counts_month_length() {
        let now = noon(2026, 7, 14);
        let counts = bucket_counts(TimeRange::Month, now, &[]);
        assert_eq!(counts.len(), 30);
    }

    #[test]
    fn test_bucket_counts_year() {
        let now = noon(2026, 7, 14);
        let timestamps = vec![
            noon(2026, 7, 1),  // current month, last bucket
            noon(2025, 8, 20), // 11 months back, first bucket
            noon(2025, 7, 20), // 12 months back, outside
        ];

        let counts = bucket_counts(TimeRange::Year, now, &timestamps);
        assert_eq!(counts.len(), 12);
        assert_eq!(counts[11], 1);
        assert_eq!(counts[0], 1);
        assert_eq!(counts.iter().sum::<u64>(), 2);
    }

    #[test]
    fn test_bucket_labels_week() {
        let now = noon(2026, 7, 14);
        let labels = TimeRange::Week.bucket_labels(now);
        assert_eq!(labels.len(), 7);
        assert_eq!(labels[0], "2026-07-08");
        assert_eq!(labels[6], "2026-07-14");
    }

    #[test]
    fn test_bucket_labels_year_cross_boundary() {
        let now = noon(2026, 3, 10);
        let labels = TimeRange::Year.bucket_labels(now);
        assert_eq!(labels.len(), 12);
        assert_eq!(labels[0], "2025-04");
        assert_eq!(labels[11], "2026-03");
    }

    #[test]
    fn test_window_start_week() {
        let now = noon(2026, 7, 14);
        let start = TimeRange::Week.window_start(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2026, 7, 8, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_window_start_year() {
        let now = noon(2026, 3, 10);
        let start = TimeRange::Year.window_start(now);
        assert_eq!(start, Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap());
    }

    fn item(title: &str, ts: DateTime<Utc>) -> ActivityItem {
        ActivityItem {
            activity_type: "article".to_string(),
            id:            Uuid::new_v4(),
            title:         title.to_string(),
            timestamp:     ts,
        }
    }

    #[test]
    fn test_merge_recent_activity_sorts_desc() {
        let merged = merge_recent_activity(
            vec![
                item("old", noon(2026, 7, 1)),
                item("new", noon(2026, 7, 14)),
                item("mid", noon(2026, 7, 7)),
            ],
            10,
        );

        let titles: Vec<&str> = merged.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["new", "mid", "old"]);
    }

    #[test]
    fn test_merge_recent_activity_respects_cap() {
        let items: Vec<ActivityItem> = (1 ..= 20)
            .map(|day| item("x", noon(2026, 6, day)))
            .collect();

        assert_eq!(merge_recent_activity(items.clone(), 5).len(), 5);
        assert_eq!(merge_recent_activity(items, 10).len(), 10);
    }

    #[test]
    fn test_merge_recent_activity_under_cap() {
        let items = vec![item("only", noon(2026, 6, 1))];
        assert_eq!(merge_recent_activity(items, 10).len(), 1);
    }
}
