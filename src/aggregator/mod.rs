//! Aggregation of fetched records into dashboard metrics.
//!
//! This module turns raw upstream records into:
//! - A total transaction count
//! - Block counts bucketed by UTC calendar hour

pub mod hourly;
pub mod metrics;

// Re-export main types and functions
pub use hourly::{bucket_by_hour, hour_key, HourBuckets};
pub use metrics::count_transactions;
