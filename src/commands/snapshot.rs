//! Snapshot command implementation.
//!
//! The snapshot command is one dashboard request:
//! 1. Fetches height, transactions and windowed blocks from upstream
//! 2. Aggregates them into a metric view
//! 3. Renders the view (HTML page, optional JSON document)

use crate::fetcher::MetricFetcher;
use crate::output::{render_dashboard, write_html, write_view, DashboardConfig};
use crate::pipeline::collect_view;
use crate::utils::config::{UpstreamConfig, DEFAULT_WINDOW_HOURS};
use crate::view::{to_document, MetricView};
use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the snapshot command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct SnapshotArgs {
    /// Upstream GraphQL endpoint URL
    pub endpoint: String,

    /// Block activity window in hours
    pub window_hours: u64,

    /// Output path for the HTML dashboard
    pub output_html: PathBuf,

    /// Output path for the JSON view document (optional)
    pub output_json: Option<PathBuf>,

    /// Dashboard page configuration
    pub dashboard_config: Option<DashboardConfig>,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for SnapshotArgs {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            window_hours: DEFAULT_WINDOW_HOURS,
            output_html: PathBuf::from("dashboard.html"),
            output_json: None,
            dashboard_config: None,
            print_summary: false,
        }
    }
}

impl SnapshotArgs {
    pub fn upstream_config(&self) -> UpstreamConfig {
        UpstreamConfig::new(self.endpoint.clone()).with_window_hours(self.window_hours)
    }
}

/// Execute the snapshot command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Upstream transport, protocol or application failures
/// * File write errors
///
/// No output is written unless every fetch step succeeded.
pub fn execute_snapshot(args: SnapshotArgs) -> Result<MetricView> {
    let start_time = Instant::now();
    let config = args.upstream_config();

    info!("Starting snapshot ({}h window)", args.window_hours);

    // Step 1: Connect to upstream
    info!("Step 1/3: Connecting to upstream...");
    let fetcher = MetricFetcher::connect(&config)
        .context("Failed to create upstream client")?;
    let fetched_at = Utc::now();

    // Step 2: Fetch and aggregate
    info!("Step 2/3: Fetching and aggregating metrics...");
    let view = collect_view(&fetcher, fetched_at)
        .context("Failed to fetch metrics from upstream")?;

    debug!("Hourly buckets:");
    for (hour, count) in view.chart_series() {
        debug!("  {} -> {}", hour, count);
    }

    // Step 3: Render
    info!("Step 3/3: Writing output files...");
    let html = render_dashboard(&view, args.dashboard_config.as_ref());
    write_html(&html, &args.output_html)
        .context("Failed to write dashboard HTML")?;

    info!("✓ Dashboard written to: {}", args.output_html.display());

    if let Some(json_path) = &args.output_json {
        let document = to_document(view.clone(), args.window_hours, fetched_at);
        write_view(&document, json_path)
            .context("Failed to write view JSON")?;

        info!("✓ View written to: {}", json_path.display());
    }

    if args.print_summary {
        print_summary(&view, args.window_hours);
    }

    let elapsed = start_time.elapsed();
    info!("Snapshot completed in {:.2}s", elapsed.as_secs_f64());

    Ok(view)
}

fn print_summary(view: &MetricView, window_hours: u64) {
    println!("\n{}", "=".repeat(60));
    println!("DASHBOARD SUMMARY");
    println!("{}", "=".repeat(60));
    println!("Block Height:        {}", view.latest_block_height);
    println!("Total Transactions:  {}", view.total_transactions_since_genesis);
    println!("Blocks (last {}h):   {}", window_hours, view.bucketed_blocks());
    for (hour, count) in view.chart_series() {
        println!("  {}  {}", hour, count);
    }
    println!("{}", "=".repeat(60));
}

/// Validate snapshot arguments
///
/// **Public** - call before execute_snapshot; failures here are startup errors
pub fn validate_args(args: &SnapshotArgs) -> Result<()> {
    args.upstream_config()
        .validate()
        .context("Invalid upstream configuration")?;

    if args.output_html.as_os_str().is_empty() {
        anyhow::bail!("HTML output path cannot be empty");
    }

    Ok(())
}
