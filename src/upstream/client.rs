//! HTTP client for the upstream GraphQL query service.

use super::types::{GraphQlRequest, GraphQlResponse};
use crate::utils::config::UpstreamConfig;
use crate::utils::error::UpstreamError;
use log::{debug, warn};
use reqwest::blocking::Client;

/// Anything that can execute a GraphQL request and hand back its `data`
///
/// Implementations report transport failures, non-success statuses,
/// undecodable envelopes and GraphQL error lists as [`UpstreamError`].
/// Decoding `data` into a result shape is left to
/// [`run_query`](super::queries::run_query).
pub trait QueryClient {
    fn execute(&self, request: &GraphQlRequest) -> Result<serde_json::Value, UpstreamError>;
}

impl<C: QueryClient + ?Sized> QueryClient for &C {
    fn execute(&self, request: &GraphQlRequest) -> Result<serde_json::Value, UpstreamError> {
        (**self).execute(request)
    }
}

/// GraphQL-over-HTTP client
pub struct HttpQueryClient {
    client: Client,
    endpoint: String,
}

impl HttpQueryClient {
    /// Create a new client for the configured endpoint
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(UpstreamError::Transport)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim().to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl QueryClient for HttpQueryClient {
    fn execute(&self, request: &GraphQlRequest) -> Result<serde_json::Value, UpstreamError> {
        debug!("POST {} ({})", self.endpoint, request.operation_name);

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .map_err(UpstreamError::Transport)?;

        // Check HTTP status
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Protocol(format!(
                "HTTP {}: {}",
                status,
                response.text().unwrap_or_default()
            )));
        }

        // Read the body first so a bad payload is a protocol error, not a transport one
        let body = response.text().map_err(UpstreamError::Transport)?;

        let envelope: GraphQlResponse = serde_json::from_str(&body).map_err(|e| {
            UpstreamError::Protocol(format!("undecodable response body: {}", e))
        })?;

        interpret_envelope(envelope)
    }
}

/// Turn a decoded envelope into its `data` payload or an error
///
/// A non-empty `errors` list wins over any partial `data`.
fn interpret_envelope(envelope: GraphQlResponse) -> Result<serde_json::Value, UpstreamError> {
    if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
        let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
        warn!("Upstream returned {} error(s): {}", messages.len(), messages.join("; "));
        return Err(UpstreamError::Application(messages));
    }

    envelope
        .data
        .ok_or_else(|| UpstreamError::Protocol("Missing data field".to_string()))
}
