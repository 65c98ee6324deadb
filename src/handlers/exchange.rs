//! Import and export handlers for GBO MCP server

use crate::GboServerHandler;
use crate::exchange::{self, ExchangeError, ExportFormat};
use crate::gbo::LineEvent;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};
use std::path::PathBuf;

impl GboServerHandler {
    /// Replaces the operation sequence with the operations found in a CSV file.
    /// A bad file leaves the current sequence untouched.
    pub async fn handle_import(&self, path: String) -> McpResult<String> {
        let path = PathBuf::from(path.trim());
        let operations = match exchange::import_operations(&path) {
            Ok(ops) => ops,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "import failed");
                bail_public!(_, "Import failed: {}", e);
            }
        };

        let count = operations.len();
        self.transition([LineEvent::ReplaceOperations(operations)])?;
        Ok(format!(
            "Imported {} operation(s) from {}",
            count,
            path.display()
        ))
    }

    /// Writes metrics and operations to a file in the given format.
    /// Without a path the file goes to the configured export directory.
    pub async fn handle_export(&self, format: String, path: Option<String>) -> McpResult<String> {
        let format: ExportFormat = format.parse().map_err(validation::invalid_params)?;
        let (state, report) = self.compute_report()?;

        let Some(metrics) = report.metrics() else {
            bail_public!(_, "Export failed: {}", ExchangeError::NoData);
        };

        let today = exchange::local_date_today();
        let path = match path {
            Some(p) if !p.trim().is_empty() => PathBuf::from(p.trim()),
            _ => self
                .config
                .export_dir
                .join(exchange::default_file_name(format, today)),
        };

        let workbook = exchange::build_workbook(state.operations(), metrics, &state.takt, today);
        if let Err(e) = exchange::export_to_path(&path, format, &workbook) {
            tracing::warn!(path = %path.display(), error = %e, "export failed");
            bail_public!(_, "Export failed: {}", e);
        }

        Ok(format!(
            "Exported {} operation(s) as {} to {}",
            workbook.operations.len(),
            format,
            path.display()
        ))
    }
}
