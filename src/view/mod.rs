//! The per-request metric view handed to renderers.

pub mod document;

pub use document::{to_document, ViewDocument};

use crate::aggregator::HourBuckets;
use serde::{Deserialize, Serialize};

/// Everything the dashboard shows, built fresh for each request
///
/// All three fields are always populated; zero and empty are valid values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricView {
    /// Chain tip at fetch time
    pub latest_block_height: u64,

    /// Transactions in blocks `1..=latest_block_height` when fetched
    pub total_transactions_since_genesis: u64,

    /// Blocks per UTC hour inside the activity window
    pub transactions_per_hour: HourBuckets,
}

/// Combine fetched and aggregated values into a view
///
/// **Public** - pure, cannot fail
pub fn assemble(
    latest_block_height: u64,
    total_transactions: u64,
    buckets: HourBuckets,
) -> MetricView {
    MetricView {
        latest_block_height,
        total_transactions_since_genesis: total_transactions,
        transactions_per_hour: buckets,
    }
}

impl MetricView {
    /// Hour buckets as `(key, count)` pairs in chronological order
    ///
    /// Keys are zero-padded `YYYY-MM-DD HH:00:00`, so string order is time order.
    pub fn chart_series(&self) -> Vec<(&str, u64)> {
        let mut series: Vec<(&str, u64)> = self
            .transactions_per_hour
            .iter()
            .map(|(hour, count)| (hour.as_str(), *count))
            .collect();
        series.sort_unstable_by(|a, b| a.0.cmp(b.0));
        series
    }

    /// Total blocks across all hour buckets
    pub fn bucketed_blocks(&self) -> u64 {
        self.transactions_per_hour.values().sum()
    }
}
