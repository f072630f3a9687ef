//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::fmt;
use thiserror::Error;

/// Errors that can occur while talking to the upstream query service
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("upstream transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid upstream response: {0}")]
    Protocol(String),

    #[error("upstream query returned errors: {}", .0.join("; "))]
    Application(Vec<String>),
}

/// Coarse classification of an [`UpstreamError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamErrorKind {
    Transport,
    Protocol,
    Application,
}

impl UpstreamError {
    pub fn kind(&self) -> UpstreamErrorKind {
        match self {
            UpstreamError::Transport(_) => UpstreamErrorKind::Transport,
            UpstreamError::Protocol(_) => UpstreamErrorKind::Protocol,
            UpstreamError::Application(_) => UpstreamErrorKind::Application,
        }
    }
}

/// The fetch step that was running when an upstream error surfaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStep {
    LatestHeight,
    Transactions,
    Blocks,
}

impl fmt::Display for FetchStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FetchStep::LatestHeight => "latest block height",
            FetchStep::Transactions => "transactions",
            FetchStep::Blocks => "blocks",
        };
        f.write_str(name)
    }
}

/// A failed metric fetch. Carries the first upstream error encountered.
#[derive(Error, Debug)]
#[error("failed to fetch {step}: {source}")]
pub struct FetchError {
    pub step: FetchStep,
    #[source]
    pub source: UpstreamError,
}

impl FetchError {
    pub fn new(step: FetchStep, source: UpstreamError) -> Self {
        Self { step, source }
    }

    pub fn kind(&self) -> UpstreamErrorKind {
        self.source.kind()
    }
}

/// Startup configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("upstream endpoint is required (--endpoint or CHAIN_DASHBOARD_ENDPOINT)")]
    MissingEndpoint,

    #[error("upstream endpoint must start with http:// or https://: {0}")]
    InvalidEndpoint(String),

    #[error("window must be between 1 and 168 hours, got {0}")]
    InvalidWindow(u64),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_application_error_joins_messages() {
        let err = UpstreamError::Application(vec!["bad filter".into(), "timeout".into()]);
        assert_eq!(err.to_string(), "upstream query returned errors: bad filter; timeout");
        assert_eq!(err.kind(), UpstreamErrorKind::Application);
    }

    #[test]
    fn test_fetch_error_names_step() {
        let err = FetchError::new(
            FetchStep::Transactions,
            UpstreamError::Protocol("HTTP 502".into()),
        );
        assert_eq!(
            err.to_string(),
            "failed to fetch transactions: invalid upstream response: HTTP 502"
        );
        assert_eq!(err.kind(), UpstreamErrorKind::Protocol);
    }
}
