//! Metrics and chart handlers for GBO MCP server

use crate::GboServerHandler;
use crate::formatting;
use crate::gbo::{ChartData, LineState, MetricsReport};
use crate::validation;
use mcp_attr::Result as McpResult;

impl GboServerHandler {
    /// Snapshot the state together with its metrics
    pub(crate) fn compute_report(&self) -> McpResult<(LineState, MetricsReport)> {
        let state = self.snapshot()?;
        let report = state.metrics().map_err(|e| {
            tracing::warn!(error = %e, "metrics computation rejected input");
            validation::invalid_params(e)
        })?;
        Ok((state, report))
    }

    /// Computes the dashboard: total, count, average, bottleneck and Takt Time.
    pub async fn handle_metrics(&self) -> McpResult<String> {
        let (state, report) = self.compute_report()?;
        Ok(formatting::format_dashboard(&report, &state.takt))
    }

    /// Builds the chart model and renders it as text bars.
    pub async fn handle_chart(&self) -> McpResult<String> {
        match self.compute_report()? {
            (_, MetricsReport::NoData) => {
                Ok("No operations added: nothing to display".to_string())
            }
            (_, MetricsReport::Ready(metrics)) => {
                Ok(formatting::format_chart(&ChartData::from_metrics(&metrics)))
            }
        }
    }
}
