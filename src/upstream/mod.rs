//! Client side of the upstream blockchain GraphQL service.

pub mod client;
pub mod queries;
pub mod types;

// Re-export main types
pub use client::{HttpQueryClient, QueryClient};
pub use queries::{run_query, BlocksQuery, LatestHeightQuery, NamedQuery, TransactionsQuery};
pub use types::{Block, GraphQlRequest, Transaction};
