//! Configuration and constants for the dashboard.

use crate::utils::error::ConfigError;
use std::time::Duration;

/// Default timeout for upstream requests
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Default width of the block activity window
pub const DEFAULT_WINDOW_HOURS: u64 = 6;

/// Upper bound for the block activity window (one week)
pub const MAX_WINDOW_HOURS: u64 = 24 * 7;

/// Environment variable consulted for the upstream endpoint
pub const ENDPOINT_ENV: &str = "CHAIN_DASHBOARD_ENDPOINT";

/// Current view document schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// chrono format for hour bucket keys ("2024-01-01 10:00:00")
pub const HOUR_KEY_FORMAT: &str = "%Y-%m-%d %H:00:00";

/// First block counted towards the total transaction count
pub const GENESIS_HEIGHT: u64 = 1;

/// Connection settings for the upstream GraphQL service
///
/// Passed explicitly into the fetcher, so several independent
/// fetchers (or tests) can point at different endpoints.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub endpoint: String,
    pub window_hours: u64,
    pub timeout: Duration,
}

impl UpstreamConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            window_hours: DEFAULT_WINDOW_HOURS,
            timeout: DEFAULT_UPSTREAM_TIMEOUT,
        }
    }

    pub fn with_window_hours(mut self, hours: u64) -> Self {
        self.window_hours = hours;
        self
    }

    /// Block activity window as a chrono duration
    pub fn window(&self) -> chrono::Duration {
        // bounded by MAX_WINDOW_HOURS once validated
        chrono::Duration::hours(self.window_hours.min(MAX_WINDOW_HOURS) as i64)
    }

    /// Check the configuration before anything talks to the network
    ///
    /// **Public** - called once at startup; any error here is fatal
    pub fn validate(&self) -> Result<(), ConfigError> {
        let endpoint = self.endpoint.trim();

        if endpoint.is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }

        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(ConfigError::InvalidEndpoint(endpoint.to_string()));
        }

        if self.window_hours == 0 || self.window_hours > MAX_WINDOW_HOURS {
            return Err(ConfigError::InvalidWindow(self.window_hours));
        }

        Ok(())
    }
}
