//! Wire types for the upstream GraphQL service.
//!
//! Request/response envelopes plus the three result shapes the
//! dashboard relies on. Each shape is decoded on its own so a
//! 200 response with the wrong body is reported as a protocol error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// GraphQL-over-HTTP request body
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest {
    pub query: String,
    pub variables: serde_json::Value,
    #[serde(rename = "operationName")]
    pub operation_name: String,
}

/// GraphQL response envelope
///
/// `data` stays opaque here; the caller decodes it into the
/// result shape of the query it issued.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

/// One entry of a GraphQL `errors` list
#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// A transaction as returned by the transactions query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Position within the block; signed on the wire
    pub index: i64,
    pub hash: String,
    pub block_height: u64,
    pub gas_wanted: u64,
    pub gas_used: u64,
    pub content_raw: String,
}

/// A block header as returned by the blocks query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub height: u64,
    /// Block time, normalised to UTC whatever offset the upstream used
    pub time: DateTime<Utc>,
}

/// Variables for queries that take none; serializes to `{}`
#[derive(Debug, Clone, Default, Serialize)]
pub struct NoVariables {}

/// Height range filter for the transactions query (inclusive)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeightRange {
    pub from_block_height: u64,
    pub to_block_height: u64,
}

/// Time window filter for the blocks query, RFC 3339 strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeWindow {
    pub from_time: String,
    pub to_time: String,
}

/// Result shape of the latest height query
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HeightData {
    #[serde(rename = "latestBlockHeight")]
    pub latest_block_height: u64,
}

/// Result shape of the transactions query
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TransactionsData {
    #[serde(deserialize_with = "null_as_empty")]
    pub transactions: Vec<Transaction>,
}

/// Result shape of the blocks query
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BlocksData {
    #[serde(deserialize_with = "null_as_empty")]
    pub blocks: Vec<Block>,
}

// GraphQL servers answer an empty filter with either `[]` or `null`
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
