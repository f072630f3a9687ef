//! One fetch → aggregate → assemble run.
//!
//! This is what a request handler calls once per request. Nothing is
//! shared between runs, and a failed fetch never yields a partial view.

use crate::aggregator::{bucket_by_hour, count_transactions};
use crate::fetcher::{FetchedMetrics, MetricFetcher};
use crate::upstream::QueryClient;
use crate::utils::error::FetchError;
use crate::view::{assemble, MetricView};
use chrono::{DateTime, Utc};
use log::info;

/// Aggregate fetched records into a view
pub fn build_view(fetched: &FetchedMetrics) -> MetricView {
    let total = count_transactions(&fetched.transactions);
    let buckets = bucket_by_hour(&fetched.blocks);
    assemble(fetched.latest_block_height, total, buckets)
}

/// Fetch and aggregate with the fetcher's configured window
///
/// **Public** - main entry point for request handlers
pub fn collect_view<C: QueryClient>(
    fetcher: &MetricFetcher<C>,
    now: DateTime<Utc>,
) -> Result<MetricView, FetchError> {
    let fetched = fetcher.fetch(now, fetcher.window())?;
    let view = build_view(&fetched);

    info!(
        "View: height {}, {} transactions since genesis, {} active hours",
        view.latest_block_height,
        view.total_transactions_since_genesis,
        view.transactions_per_hour.len()
    );

    Ok(view)
}
