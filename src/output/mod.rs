//! Renderers for metric views.
//!
//! This module handles turning a view into something to look at:
//! - HTML dashboard pages with an hourly chart
//! - JSON view documents (write and read back)

pub mod html;
pub mod json;

// Re-export main functions
pub use html::{render_dashboard, write_html, DashboardConfig};
pub use json::{read_view, view_to_string, write_view};
