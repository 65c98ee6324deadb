//! GBO MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server for line
//! balancing: operations with their durations are compared against each other
//! and against Takt Time to find the bottleneck of a production line
//! (GBO, "Gráfico de Balanceamento de Operações").
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `GboServerHandler` - Handles MCP protocol communication
//! - **Domain Layer**: `gbo` module - Unit conversion, metrics engine and session state
//! - **Exchange Layer**: `exchange` module - CSV import and CSV/TOML/text export
//!
//! # Example
//!
//! ```no_run
//! use gbo_mcp::{Config, GboServerHandler};
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = GboServerHandler::new(Config::default());
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod exchange;
pub mod formatting;
pub mod gbo;
mod handlers;
pub mod validation;

use mcp_attr::Result as McpResult;
use mcp_attr::server::{McpServer, mcp_server};
use std::sync::{Mutex, MutexGuard};

// Re-export commonly used types
pub use config::Config;
pub use gbo::{
    LineEvent, LineState, Metrics, MetricsReport, Operation, ShiftUnit, TaktInput, TimeUnit,
    compute_metrics, compute_takt_time_seconds, convert_time,
};

/// MCP Server handler for line balancing
///
/// Holds one in-memory session. Every tool call that changes the session
/// applies events to a copy of the state and swaps it in only when all of
/// them succeed.
pub struct GboServerHandler {
    pub(crate) state: Mutex<LineState>,
    pub(crate) config: Config,
}

impl GboServerHandler {
    /// Create a handler with an empty session
    ///
    /// # Example
    /// ```
    /// # use gbo_mcp::{Config, GboServerHandler, TimeUnit};
    /// let handler = GboServerHandler::new(Config::default());
    /// assert_eq!(handler.snapshot().unwrap().display_unit, TimeUnit::Minutes);
    /// ```
    pub fn new(config: Config) -> Self {
        let state = LineState::new(config.display_unit, config.demand_unit.clone());
        Self::with_state(config, state)
    }

    /// Create a handler with a prepared session (e.g., preloaded operations)
    pub fn with_state(config: Config, state: LineState) -> Self {
        Self {
            state: Mutex::new(state),
            config,
        }
    }

    fn lock_state(&self) -> McpResult<MutexGuard<'_, LineState>> {
        self.state
            .lock()
            .map_err(|_| validation::invalid_params("Session state is unavailable"))
    }

    /// Copy of the current session state
    pub fn snapshot(&self) -> McpResult<LineState> {
        Ok(self.lock_state()?.clone())
    }

    /// Apply events atomically and return the new state
    pub(crate) fn transition(
        &self,
        events: impl IntoIterator<Item = LineEvent>,
    ) -> McpResult<LineState> {
        let mut guard = self.lock_state()?;
        let mut next = guard.clone();
        for event in events {
            next = next.apply(event).map_err(|e| {
                tracing::debug!(error = %e, "event rejected");
                validation::invalid_params(e)
            })?;
        }
        *guard = next.clone();
        Ok(next)
    }
}

/// Line balancing (GBO) server: find the bottleneck of a production line and compare it to Takt Time.
///
/// Key concepts:
/// - **Operation**: a named step of the line with its duration (minutes or seconds)
/// - **Takt Time**: available shift time divided by daily demand; the pace the line must keep
/// - **Bottleneck**: the longest operation; any operation above Takt Time is flagged too
/// - **Display unit**: minutes or seconds, used for every time shown
///
/// Workflow: add_operation (or import_operations) → set_takt → metrics/chart → export.
/// Operation IDs are generated: op-1, op-2, ...
#[mcp_server]
impl McpServer for GboServerHandler {
    /// **Add**: Append an operation to the line. Name needs 2+ characters, time must be greater than 0.
    /// **Unit**: "minutes" or "seconds"; defaults to the current display unit.
    #[tool]
    async fn add_operation(
        &self,
        /// Operation name (e.g., "Montagem", "Soldagem")
        name: String,
        /// Duration, greater than 0
        time: f64,
        /// Unit of the duration: minutes/seconds (optional)
        unit: Option<String>,
    ) -> McpResult<String> {
        self.handle_add_operation(name, time, unit).await
    }

    /// **Remove**: Delete an operation by ID.
    #[tool]
    async fn remove_operation(
        &self,
        /// Operation ID (e.g., "op-3")
        id: String,
    ) -> McpResult<String> {
        self.handle_remove_operation(id).await
    }

    /// **Reorder**: Move an operation to a new position. Order changes display and export only, never the metrics.
    #[tool]
    async fn move_operation(
        &self,
        /// Operation ID (e.g., "op-3")
        id: String,
        /// Target position, starting at 1
        position: usize,
    ) -> McpResult<String> {
        self.handle_move_operation(id, position).await
    }

    /// **List**: Show all operations in line order, converted to the display unit.
    #[tool]
    async fn list_operations(&self) -> McpResult<String> {
        self.handle_list_operations().await
    }

    /// **Display unit**: Choose minutes or seconds for every time shown and exported.
    #[tool]
    async fn set_display_unit(
        &self,
        /// minutes/seconds
        unit: String,
    ) -> McpResult<String> {
        self.handle_set_display_unit(unit).await
    }

    /// **Takt Time**: Set shift duration and daily demand. Takt Time = shift / demand.
    /// **Tip**: Changing only shift_unit converts the stored shift duration. Takt Time stays undefined until both values are set.
    #[tool]
    async fn set_takt(
        &self,
        /// Available time per day, greater than 0 (optional)
        shift_duration: Option<f64>,
        /// Unit of the shift duration: minutes/seconds/hours (optional)
        shift_unit: Option<String>,
        /// Units to produce per day, greater than 0 (optional)
        daily_demand: Option<f64>,
        /// Label of the demand quantity, e.g. "peças", "kg" (optional)
        demand_unit: Option<String>,
    ) -> McpResult<String> {
        self.handle_set_takt(shift_duration, shift_unit, daily_demand, demand_unit)
            .await
    }

    /// **Takt Time**: Clear shift duration and daily demand.
    #[tool]
    async fn clear_takt(&self) -> McpResult<String> {
        self.handle_clear_takt().await
    }

    /// **Dashboard**: Total time, number of operations, average time, bottleneck and Takt Time.
    #[tool]
    async fn metrics(&self) -> McpResult<String> {
        self.handle_metrics().await
    }

    /// **Chart**: Bars per operation with their tier (exceeds takt > bottleneck > normal) and the average/Takt reference lines.
    #[tool]
    async fn chart(&self) -> McpResult<String> {
        self.handle_chart().await
    }

    /// **Import**: Replace all operations with rows (name, time) from a CSV file. Times are minutes unless a "Tempo (seconds)" header says otherwise.
    #[tool]
    async fn import_operations(
        &self,
        /// Path to the CSV file
        path: String,
    ) -> McpResult<String> {
        self.handle_import(path).await
    }

    /// **Export**: Write metrics and the operation table (with Gargalo/Normal status) to a file.
    #[tool]
    async fn export(
        &self,
        /// Format: csv/toml/report
        format: String,
        /// Output path; default is analise-gbo-YYYY-MM-DD.<ext> in the export directory (optional)
        path: Option<String>,
    ) -> McpResult<String> {
        self.handle_export(format, path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn get_test_handler() -> GboServerHandler {
        GboServerHandler::new(Config::default())
    }

    /// Extract ID from "Operation created with ID: <id> (...)"
    fn extract_id_from_response(response: &str) -> String {
        if let Some(start) = response.find("ID: ") {
            let id_part = &response[start + 4..];
            if let Some(end) = id_part.find(" (") {
                return id_part[..end].trim().to_string();
            }
        }
        String::new()
    }

    async fn add_abc(handler: &GboServerHandler) -> Vec<String> {
        let mut ids = Vec::new();
        for (name, time) in [("A1", 5.0), ("B1", 2.0), ("C1", 10.0)] {
            let result = handler
                .add_operation(name.to_string(), time, Some("minutes".to_string()))
                .await
                .unwrap();
            ids.push(extract_id_from_response(&result));
        }
        ids
    }

    #[tokio::test]
    async fn test_add_operation_response() {
        let handler = get_test_handler();
        let result = handler
            .add_operation("Montagem".to_string(), 5.0, None)
            .await
            .unwrap();
        assert_eq!(result, "Operation created with ID: op-1 (Montagem: 5.0 minutes)");
        assert_eq!(extract_id_from_response(&result), "op-1");
    }

    #[tokio::test]
    async fn test_add_operation_invalid_input() {
        let handler = get_test_handler();
        assert!(handler.add_operation("A".to_string(), 5.0, None).await.is_err());
        assert!(handler.add_operation("Solda".to_string(), -2.0, None).await.is_err());
        assert!(
            handler
                .add_operation("Solda".to_string(), 2.0, Some("hours".to_string()))
                .await
                .is_err()
        );
        assert!(handler.snapshot().unwrap().operations().is_empty());
    }

    #[tokio::test]
    async fn test_remove_and_move() {
        let handler = get_test_handler();
        let ids = add_abc(&handler).await;

        let result = handler.move_operation(ids[2].clone(), 1).await.unwrap();
        assert!(result.contains("moved to position 1"));
        let names: Vec<String> = handler
            .snapshot()
            .unwrap()
            .operations()
            .iter()
            .map(|op| op.name.clone())
            .collect();
        assert_eq!(names, vec!["C1", "A1", "B1"]);

        assert!(handler.move_operation(ids[0].clone(), 0).await.is_err());

        let result = handler.remove_operation(ids[1].clone()).await.unwrap();
        assert_eq!(result, "Operation op-2 (B1) removed");
        assert!(handler.remove_operation(ids[1].clone()).await.is_err());
        assert_eq!(handler.snapshot().unwrap().operations().len(), 2);
    }

    #[tokio::test]
    async fn test_metrics_dashboard_with_takt() {
        let handler = get_test_handler();
        assert!(handler.metrics().await.unwrap().contains("nothing to display"));

        add_abc(&handler).await;
        let result = handler
            .set_takt(Some(8.0), Some("hours".to_string()), Some(80.0), None)
            .await
            .unwrap();
        assert!(result.starts_with("Takt Time: 0.10 hours/peças"));

        let dashboard = handler.metrics().await.unwrap();
        assert!(dashboard.contains("Total time: 17.0 minutes"));
        assert!(dashboard.contains("Bottleneck: C1 (10.0 minutes)"));
        assert!(dashboard.contains("Takt Time: 6.0 minutes/peças"));
        assert!(dashboard.contains("Exceeding Takt Time: C1"));
    }

    #[tokio::test]
    async fn test_set_takt_is_atomic() {
        let handler = get_test_handler();
        handler
            .set_takt(Some(480.0), None, Some(100.0), None)
            .await
            .unwrap();

        // Bad demand must not apply the new shift either
        let result = handler
            .set_takt(Some(600.0), None, Some(0.0), None)
            .await;
        assert!(result.is_err());
        let state = handler.snapshot().unwrap();
        assert_eq!(state.takt.shift_duration, Some(480.0));
        assert_eq!(state.takt_time_seconds(), Some(288.0));
    }

    #[tokio::test]
    async fn test_shift_unit_switch_converts_duration() {
        let handler = get_test_handler();
        handler
            .set_takt(Some(8.0), Some("hours".to_string()), None, None)
            .await
            .unwrap();
        let result = handler
            .set_takt(None, Some("minutes".to_string()), None, None)
            .await
            .unwrap();
        assert!(result.contains("Shift: 480.0 minutes"));
        assert!(result.starts_with("Takt Time not defined"));

        handler.clear_takt().await.unwrap();
        assert_eq!(handler.snapshot().unwrap().takt.shift_duration, None);
    }

    #[tokio::test]
    async fn test_display_unit_and_chart() {
        let handler = get_test_handler();
        add_abc(&handler).await;
        handler.set_display_unit("seconds".to_string()).await.unwrap();

        let list = handler.list_operations().await.unwrap();
        assert!(list.contains("[op-3] C1: 600.0 seconds (entered as 10.0 minutes)"));

        let chart = handler.chart().await.unwrap();
        assert!(chart.contains("GBO chart (seconds)"));
        assert!(chart.contains("[bottleneck]"));
        assert!(!chart.contains("Takt Time"));

        assert!(handler.set_display_unit("hours".to_string()).await.is_err());
    }

    #[tokio::test]
    async fn test_export_and_import_round_trip() {
        let dir = TempDir::new().unwrap();
        let handler = get_test_handler();
        add_abc(&handler).await;

        let csv_path = dir.path().join("gbo.csv");
        let result = handler
            .export("csv".to_string(), Some(csv_path.to_string_lossy().to_string()))
            .await
            .unwrap();
        assert!(result.starts_with("Exported 3 operation(s) as csv"));
        let content = fs::read_to_string(&csv_path).unwrap();
        assert!(content.contains("\"C1\",10.0,\"10.0 minutes\",\"Gargalo\",\"58.8%\""));

        let other = get_test_handler();
        let result = other
            .import_operations(csv_path.to_string_lossy().to_string())
            .await
            .unwrap();
        assert!(result.starts_with("Imported 3 operation(s)"));
        assert_eq!(
            handler.metrics().await.unwrap(),
            other.metrics().await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_export_default_path_uses_export_dir() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            export_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        let handler = GboServerHandler::new(config);
        add_abc(&handler).await;

        handler.export("report".to_string(), None).await.unwrap();
        let expected = dir.path().join(exchange::default_file_name(
            exchange::ExportFormat::Report,
            exchange::local_date_today(),
        ));
        assert!(expected.exists());
    }

    #[tokio::test]
    async fn test_export_without_operations_fails() {
        let dir = TempDir::new().unwrap();
        let handler = get_test_handler();
        let path = dir.path().join("empty.csv");
        let result = handler
            .export("csv".to_string(), Some(path.to_string_lossy().to_string()))
            .await;
        assert!(result.is_err());
        assert!(!path.exists());
        assert!(handler.export("pdf".to_string(), None).await.is_err());
    }

    #[tokio::test]
    async fn test_failed_import_keeps_operations() {
        let dir = TempDir::new().unwrap();
        let handler = get_test_handler();
        add_abc(&handler).await;

        let bad = dir.path().join("bad.csv");
        fs::write(&bad, "Montagem,5\nSolda,-1\n").unwrap();
        assert!(
            handler
                .import_operations(bad.to_string_lossy().to_string())
                .await
                .is_err()
        );
        let missing = dir.path().join("missing.csv");
        assert!(
            handler
                .import_operations(missing.to_string_lossy().to_string())
                .await
                .is_err()
        );
        assert_eq!(handler.snapshot().unwrap().operations().len(), 3);
    }
}
