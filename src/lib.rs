//! Chain Dashboard
//!
//! Fetches block height, transactions and recent blocks from a
//! blockchain GraphQL endpoint and derives the dashboard metrics:
//! total transactions since genesis and blocks per UTC hour.
//!
//! The per-request pipeline is [`pipeline::collect_view`]:
//! [`fetcher::MetricFetcher`] → [`aggregator`] → [`view::assemble`].

pub mod aggregator;
pub mod commands;
pub mod fetcher;
pub mod output;
pub mod pipeline;
pub mod upstream;
pub mod utils;
pub mod view;
