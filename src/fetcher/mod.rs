//! Fetch orchestration for the dashboard metrics.
//!
//! The fetcher runs three queries, in order:
//! 1. Latest block height
//! 2. Transactions from block 1 up to that height
//! 3. Blocks inside the activity window ending at `now`
//!
//! The first failing step aborts the fetch; later steps are never sent.
//! Steps 1 and 2 are separate round trips, so the chain may advance in
//! between and the transaction count can trail the reported height.

use crate::upstream::types::{HeightRange, NoVariables, TimeWindow};
use crate::upstream::{
    run_query, Block, BlocksQuery, HttpQueryClient, LatestHeightQuery, QueryClient, Transaction,
    TransactionsQuery,
};
use crate::utils::config::{UpstreamConfig, GENESIS_HEIGHT};
use crate::utils::error::{FetchError, FetchStep, UpstreamError};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use log::{debug, info};

/// Raw inputs for one metric view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedMetrics {
    pub latest_block_height: u64,
    pub transactions: Vec<Transaction>,
    pub blocks: Vec<Block>,
}

/// Runs the metric queries against one upstream client
///
/// Holds no cache and no mutable state between fetches.
pub struct MetricFetcher<C> {
    client: C,
    window: Duration,
}

impl MetricFetcher<HttpQueryClient> {
    /// Build a fetcher talking HTTP to the configured endpoint
    pub fn connect(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        info!("Upstream endpoint: {}", config.endpoint.trim());
        let client = HttpQueryClient::new(config)?;
        Ok(Self::new(client, config.window()))
    }
}

impl<C: QueryClient> MetricFetcher<C> {
    pub fn new(client: C, window: Duration) -> Self {
        Self { client, window }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Fetch with the configured window, ending now
    pub fn fetch_now(&self) -> Result<FetchedMetrics, FetchError> {
        self.fetch(Utc::now(), self.window)
    }

    /// Fetch height, transactions since genesis and blocks in `[now - window, now]`
    ///
    /// **Public** - main entry point for fetch orchestration
    ///
    /// # Errors
    /// `FetchError` naming the first step that failed
    pub fn fetch(
        &self,
        now: DateTime<Utc>,
        window: Duration,
    ) -> Result<FetchedMetrics, FetchError> {
        // Step 1: Latest height
        debug!("Step 1/3: Fetching latest block height...");
        let latest_block_height =
            run_query::<LatestHeightQuery, _>(&self.client, &NoVariables::default())
                .map_err(|e| FetchError::new(FetchStep::LatestHeight, e))?
                .latest_block_height;

        // Step 2: Transactions since genesis
        debug!(
            "Step 2/3: Fetching transactions {}..={}",
            GENESIS_HEIGHT, latest_block_height
        );
        let range = HeightRange {
            from_block_height: GENESIS_HEIGHT,
            to_block_height: latest_block_height,
        };
        let transactions = run_query::<TransactionsQuery, _>(&self.client, &range)
            .map_err(|e| FetchError::new(FetchStep::Transactions, e))?
            .transactions;

        // Step 3: Blocks in window
        let time_window = time_window(now, window);
        debug!("Step 3/3: Fetching blocks {} .. {}", time_window.from_time, time_window.to_time);
        let blocks = run_query::<BlocksQuery, _>(&self.client, &time_window)
            .map_err(|e| FetchError::new(FetchStep::Blocks, e))?
            .blocks;

        info!(
            "Fetched height {}, {} transactions, {} blocks in window",
            latest_block_height,
            transactions.len(),
            blocks.len()
        );

        Ok(FetchedMetrics {
            latest_block_height,
            transactions,
            blocks,
        })
    }
}

/// Blocks query filter for the window ending at `now`
///
/// **Private** - formats both ends as RFC 3339 UTC with second precision
fn time_window(now: DateTime<Utc>, window: Duration) -> TimeWindow {
    let from = now - window;
    TimeWindow {
        from_time: from.to_rfc3339_opts(SecondsFormat::Secs, true),
        to_time: now.to_rfc3339_opts(SecondsFormat::Secs, true),
    }
}
