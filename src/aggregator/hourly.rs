//! Bucket blocks by the UTC calendar hour they were produced in.
//!
//! Keys look like `2024-01-01 10:00:00`. Only hours that actually
//! contain a block get a key; empty hours are not filled in.

use crate::upstream::Block;
use crate::utils::config::HOUR_KEY_FORMAT;
use chrono::{DateTime, Utc};
use log::debug;
use std::collections::HashMap;

/// Block count per hour key. Iteration order is unspecified.
pub type HourBuckets = HashMap<String, u64>;

/// Format the start of the hour containing `time`
///
/// Minutes, seconds and sub-second parts are dropped.
pub fn hour_key(time: &DateTime<Utc>) -> String {
    time.format(HOUR_KEY_FORMAT).to_string()
}

/// Count blocks per UTC calendar hour
///
/// **Public** - main entry point for hourly aggregation
///
/// The result depends only on the multiset of block times, never on
/// input order. Blocks are not re-filtered against the fetch window.
pub fn bucket_by_hour(blocks: &[Block]) -> HourBuckets {
    let mut buckets = HourBuckets::new();

    for block in blocks {
        *buckets.entry(hour_key(&block.time)).or_insert(0) += 1;
    }

    debug!("Bucketed {} blocks into {} hours", blocks.len(), buckets.len());

    buckets
}
