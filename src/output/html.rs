//! HTML dashboard renderer.
//!
//! Renders a metric view into a standalone page: current block height,
//! transactions since block 1, and a Chart.js bar chart of blocks per hour.

use super::json::{create_parent_dirs, validate_output_path};
use crate::utils::error::OutputError;
use crate::view::MetricView;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const CHART_JS_URL: &str = "https://cdn.jsdelivr.net/npm/chart.js";

/// Dashboard page configuration
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub title: String,
    pub chart_width: usize,
    pub chart_height: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Dashboard".to_string(),
            chart_width: 800,
            chart_height: 400,
        }
    }
}

impl DashboardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// Render the dashboard page for a view
///
/// **Public** - main entry point for HTML rendering
///
/// Chart labels are the hour keys in chronological order.
pub fn render_dashboard(view: &MetricView, config: Option<&DashboardConfig>) -> String {
    let default_config = DashboardConfig::default();
    let config = config.unwrap_or(&default_config);
    let title = escape_html(&config.title);

    let series = view.chart_series();
    let labels = series
        .iter()
        .map(|(hour, _)| format!("\"{}\"", escape_html(hour)))
        .collect::<Vec<_>>()
        .join(",");
    let counts = series
        .iter()
        .map(|(_, count)| count.to_string())
        .collect::<Vec<_>>()
        .join(",");

    debug!("Rendering dashboard with {} chart points", series.len());

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <script src="{chart_js}"></script>
</head>
<body>
    <h1>{title}</h1>
    <p>Current Block Height: {height}</p>
    <p>Total Transactions Since Block 1: {total}</p>
    <canvas id="transactionsChart" width="{width}" height="{height_px}"></canvas>
    <script>
        var ctx = document.getElementById('transactionsChart').getContext('2d');

        var myChart = new Chart(ctx, {{
            type: 'bar',
            data: {{
                labels: [{labels}],
                datasets: [{{
                    label: 'Transactions per Hour',
                    data: [{counts}],
                    backgroundColor: 'rgba(54, 162, 235, 0.5)',
                    borderColor: 'rgba(54, 162, 235, 1)',
                    borderWidth: 1
                }}]
            }},
            options: {{
                scales: {{
                    y: {{
                        beginAtZero: true
                    }}
                }}
            }}
        }});
    </script>
</body>
</html>
"#,
        title = title,
        chart_js = CHART_JS_URL,
        height = view.latest_block_height,
        total = view.total_transactions_since_genesis,
        width = config.chart_width,
        height_px = config.chart_height,
        labels = labels,
        counts = counts,
    )
}

/// Write rendered HTML to a file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
pub fn write_html(html: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing dashboard to: {}", output_path.display());

    validate_output_path(output_path)?;
    create_parent_dirs(output_path)?;

    let file = File::create(output_path)
        .map_err(OutputError::WriteFailed)?;

    let mut writer = BufWriter::new(file);

    writer.write_all(html.as_bytes())
        .map_err(OutputError::WriteFailed)?;

    writer.flush()
        .map_err(OutputError::WriteFailed)?;

    info!("Dashboard written successfully ({:.2} KB)", html.len() as f64 / 1024.0);

    Ok(())
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<b>\"x\" & 'y'</b>"),
            "&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn test_title_is_escaped() {
        let view = crate::view::assemble(1, 1, Default::default());
        let config = DashboardConfig::new().with_title("<script>");
        let html = render_dashboard(&view, Some(&config));

        assert!(html.contains("<title>&lt;script&gt;</title>"));
        assert!(!html.contains("<title><script></title>"));
    }
}
