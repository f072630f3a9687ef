//! Named GraphQL queries and the generic executor that runs them.
//!
//! Each query is a zero-sized type carrying its document, operation
//! name, variable shape and result shape. [`run_query`] is the single
//! place where a query is sent and its `data` payload decoded.

use super::client::QueryClient;
use super::types::{
    BlocksData, GraphQlRequest, HeightData, HeightRange, NoVariables, TimeWindow, TransactionsData,
};
use crate::utils::error::UpstreamError;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A GraphQL query with a fixed document and typed variables/result
pub trait NamedQuery {
    /// Operation name sent as `operationName`
    const OPERATION: &'static str;

    /// GraphQL document text
    const DOCUMENT: &'static str;

    type Variables: Serialize;
    type Output: DeserializeOwned;
}

/// `{ latestBlockHeight }`
pub struct LatestHeightQuery;

impl NamedQuery for LatestHeightQuery {
    const OPERATION: &'static str = "LatestBlockHeight";
    const DOCUMENT: &'static str = r#"
        query LatestBlockHeight {
            latestBlockHeight
        }
    "#;

    type Variables = NoVariables;
    type Output = HeightData;
}

/// Transactions whose block height falls in a range
pub struct TransactionsQuery;

impl NamedQuery for TransactionsQuery {
    const OPERATION: &'static str = "TotalTransactions";
    const DOCUMENT: &'static str = r#"
        query TotalTransactions($fromBlockHeight: Int, $toBlockHeight: Int) {
            transactions(filter: { from_block_height: $fromBlockHeight, to_block_height: $toBlockHeight }) {
                index
                hash
                block_height
                gas_wanted
                gas_used
                content_raw
            }
        }
    "#;

    type Variables = HeightRange;
    type Output = TransactionsData;
}

/// Blocks produced within a time window
pub struct BlocksQuery;

impl NamedQuery for BlocksQuery {
    const OPERATION: &'static str = "BlocksWithinTimeRange";
    const DOCUMENT: &'static str = r#"
        query BlocksWithinTimeRange($fromTime: Time!, $toTime: Time!) {
            blocks(filter: { from_time: $fromTime, to_time: $toTime }) {
                height
                time
            }
        }
    "#;

    type Variables = TimeWindow;
    type Output = BlocksData;
}

impl GraphQlRequest {
    /// Build the request body for a named query
    pub fn for_query<Q: NamedQuery>(variables: &Q::Variables) -> Result<Self, UpstreamError> {
        let variables = serde_json::to_value(variables).map_err(|e| {
            UpstreamError::Protocol(format!("cannot encode {} variables: {}", Q::OPERATION, e))
        })?;

        Ok(Self {
            query: Q::DOCUMENT.to_string(),
            variables,
            operation_name: Q::OPERATION.to_string(),
        })
    }
}

/// Execute a named query and decode its result shape
///
/// **Public** - the one primitive every fetch step goes through
///
/// # Errors
/// * Whatever the client reports (transport, status, GraphQL errors)
/// * `UpstreamError::Protocol` if `data` does not match `Q::Output`
pub fn run_query<Q, C>(client: &C, variables: &Q::Variables) -> Result<Q::Output, UpstreamError>
where
    Q: NamedQuery,
    C: QueryClient + ?Sized,
{
    let request = GraphQlRequest::for_query::<Q>(variables)?;

    debug!("Running {} with variables {}", Q::OPERATION, request.variables);

    let data = client.execute(&request)?;

    serde_json::from_value(data).map_err(|e| {
        UpstreamError::Protocol(format!("malformed {} result: {}", Q::OPERATION, e))
    })
}
