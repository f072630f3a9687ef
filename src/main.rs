//! Chain Dashboard CLI
//!
//! Queries a blockchain GraphQL endpoint and renders the current block
//! height, transactions since genesis and hourly block activity.

use anyhow::Result;
use chain_dashboard::commands::{
    display_version, execute_snapshot, validate_args, validate_view_file, SnapshotArgs,
};
use chain_dashboard::output::DashboardConfig;
use chain_dashboard::utils::config::{DEFAULT_WINDOW_HOURS, ENDPOINT_ENV};
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

/// Chain Dashboard - block and transaction activity at a glance
#[derive(Parser, Debug)]
#[command(name = "chain-dashboard")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch metrics once and render the dashboard
    Snapshot {
        /// Upstream GraphQL endpoint URL
        #[arg(short, long, env = ENDPOINT_ENV)]
        endpoint: String,

        /// Block activity window in hours
        #[arg(short, long, default_value_t = DEFAULT_WINDOW_HOURS)]
        window_hours: u64,

        /// Output path for the HTML dashboard
        #[arg(short, long, default_value = "dashboard.html")]
        output: PathBuf,

        /// Output path for the JSON view document (optional)
        #[arg(short, long)]
        json: Option<PathBuf>,

        /// Dashboard page title
        #[arg(long)]
        title: Option<String>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a view JSON file
    Validate {
        /// Path to view JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Snapshot {
            endpoint,
            window_hours,
            output,
            json,
            title,
            summary,
        } => {
            let dashboard_config = title.map(|t| DashboardConfig::new().with_title(t));

            let args = SnapshotArgs {
                endpoint,
                window_hours,
                output_html: output,
                output_json: json,
                dashboard_config,
                print_summary: summary,
            };

            // Bad configuration is fatal before any request goes out
            validate_args(&args)?;

            execute_snapshot(args)?;
        }

        Commands::Validate { file } => {
            validate_view_file(file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
