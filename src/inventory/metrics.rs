use restock_schema::MetricsResponse;
use std::collections::BTreeMap;

use crate::db::DbHistoryEntry;

/// Aggregates the dashboard numbers from the missing-row count and the full history.
pub fn summarize(missing_count: u64, history: &[DbHistoryEntry]) -> MetricsResponse {
    let received_count = history.len() as u64;

    let mut supplier_counts: BTreeMap<String, u64> = BTreeMap::new();
    for entry in history {
        *supplier_counts.entry(entry.supplier_name.clone()).or_default() += 1;
    }

    let total_days: i64 = history.iter().map(|entry| entry.response_time_days).sum();

    MetricsResponse {
        missing_count,
        received_count,
        avg_days: average_days(total_days, received_count),
        supplier_counts,
    }
}

/// Mean rounded to the nearest integer, halves away from zero. `0` for an empty history.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn average_days(total_days: i64, count: u64) -> i64 {
    if count == 0 {
        return 0;
    }
    (total_days as f64 / count as f64).round() as i64
}
