//! Tests for import statistics

use crate::app::models::SkipReason;
use crate::app::services::roster_parser::stats::ImportStats;

#[test]
fn test_import_stats_calculation() {
    let mut stats = ImportStats {
        total_rows: 11,
        header_detected: true,
        students_accepted: 8,
        ..ImportStats::new()
    };
    stats.record_skip(SkipReason::EmptyRow);
    stats.record_skip(SkipReason::TooShort);

    assert_eq!(stats.data_rows(), 10);
    assert_eq!(stats.rows_skipped(), 2);
    assert_eq!(stats.acceptance_rate(), 80.0);
}

#[test]
fn test_import_stats_empty() {
    let stats = ImportStats::new();

    assert_eq!(stats.total_rows, 0);
    assert_eq!(stats.data_rows(), 0);
    assert_eq!(stats.rows_skipped(), 0);
    assert_eq!(stats.acceptance_rate(), 0.0);
}

#[test]
fn test_record_skip_counts_each_reason() {
    let mut stats = ImportStats::new();
    for reason in [
        SkipReason::EmptyRow,
        SkipReason::StrayHeader,
        SkipReason::TooShort,
        SkipReason::HeaderEcho,
        SkipReason::HeaderEcho,
    ] {
        stats.record_skip(reason);
    }

    assert_eq!(stats.empty_rows, 1);
    assert_eq!(stats.stray_headers, 1);
    assert_eq!(stats.too_short, 1);
    assert_eq!(stats.header_echoes, 2);
    assert_eq!(stats.rows_skipped(), 5);
}

#[test]
fn test_summary_mentions_counts() {
    let stats = ImportStats {
        total_rows: 3,
        header_detected: true,
        students_accepted: 2,
        ..ImportStats::new()
    };

    let summary = stats.summary();
    assert!(summary.starts_with("2 students from 2 data rows"));
    assert!(summary.contains("100.0% accepted"));
    assert!(summary.contains("header: yes"));
}
