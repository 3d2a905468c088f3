//! Aggregation primitives, exercised through the crate's public API.

use chrono::{TimeZone, Utc};
use server::{
    dto::dashboard::ActivityItem,
    stats::{bucket_counts, calculate_growth, merge_recent_activity, TimeRange},
};
use uuid::Uuid;

#[test]
fn test_growth_contract_values() {
    // The one hard numeric rule in the system.
    assert_eq!(calculate_growth(10, 0), 100);
    assert_eq!(calculate_growth(0, 0), 0);
    assert_eq!(calculate_growth(15, 10), 50);
    assert_eq!(calculate_growth(5, 10), -50);
}

#[test]
fn test_bucket_counts_fixed_lengths() {
    let now = Utc.with_ymd_and_hms(2026, 7, 14, 12, 0, 0).unwrap();
    assert_eq!(bucket_counts(TimeRange::Week, now, &[]).len(), 7);
    assert_eq!(bucket_counts(TimeRange::Month, now, &[]).len(), 30);
    assert_eq!(bucket_counts(TimeRange::Year, now, &[]).len(), 12);
}

#[test]
fn test_labels_match_bucket_counts() {
    let now = Utc.with_ymd_and_hms(2026, 2, 28, 9, 0, 0).unwrap();
    for range in [TimeRange::Week, TimeRange::Month, TimeRange::Year] {
        assert_eq!(range.bucket_labels(now).len(), range.bucket_count());
    }
}

#[test]
fn test_activity_feed_never_exceeds_cap() {
    let items: Vec<ActivityItem> = (0 .. 100)
        .map(|i| {
            ActivityItem {
                activity_type: "contact".to_string(),
                id:            Uuid::new_v4(),
                title:         format!("Submission {}", i),
                timestamp:     Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap() +
                    chrono::Duration::minutes(i),
            }
        })
        .collect();

    for cap in [5usize, 10] {
        let merged = merge_recent_activity(items.clone(), cap);
        assert_eq!(merged.len(), cap);
        // Newest first
        assert!(merged[0].timestamp > merged[cap - 1].timestamp);
    }
}
