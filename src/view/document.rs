//! Versioned JSON document wrapping a metric view.
//!
//! This is the shape written to disk by the JSON renderer and read back
//! by `validate`.

use super::MetricView;
use crate::utils::config::SCHEMA_VERSION;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Top-level structure written to JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewDocument {
    /// Schema version for compatibility checking
    pub version: String,

    /// When the view was fetched (RFC 3339)
    pub generated_at: String,

    /// Width of the block activity window in hours
    pub window_hours: u64,

    pub view: MetricView,
}

/// Wrap a view for output
pub fn to_document(
    view: MetricView,
    window_hours: u64,
    generated_at: DateTime<Utc>,
) -> ViewDocument {
    ViewDocument {
        version: SCHEMA_VERSION.to_string(),
        generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        window_hours,
        view,
    }
}
