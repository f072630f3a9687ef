use anyhow::{Context, Result};
use std::path::PathBuf;
use crate::output::read_view;
use crate::utils::config::SCHEMA_VERSION;

/// Validate a view JSON file
pub fn validate_view_file(file_path: PathBuf) -> Result<()> {
    println!("Validating view: {}", file_path.display());

    let document = read_view(&file_path)
        .with_context(|| format!("Failed to read {}", file_path.display()))?;

    if document.version != SCHEMA_VERSION {
        anyhow::bail!(
            "Unsupported schema version {} (expected {})",
            document.version,
            SCHEMA_VERSION
        );
    }

    println!("✓ Valid view JSON");
    println!("  Version: {}", document.version);
    println!("  Generated: {}", document.generated_at);
    println!("  Block Height: {}", document.view.latest_block_height);
    println!("  Total Transactions: {}", document.view.total_transactions_since_genesis);
    println!(
        "  Active Hours: {} (window {}h)",
        document.view.transactions_per_hour.len(),
        document.window_hours
    );

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("Chain Dashboard v{}", env!("CARGO_PKG_VERSION"));
    println!("View Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Block height, transaction totals and hourly block activity from a GraphQL endpoint.");
}
