//! Spreadsheet import and report export
//!
//! These are the file collaborators of the engine: they turn a CSV sheet into
//! new operations and turn computed metrics into CSV, TOML or text files.
//! Failures here never touch the line state.

pub mod csv;
mod export;
mod import;

pub use export::{
    MetricsSheet, OperationRow, Workbook, build_workbook, export_to_path, render, render_csv,
    render_report, render_toml,
};
pub use import::{import_operations, operations_from_csv};

use chrono::{Local, NaiveDate};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised while importing or exporting files
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("Failed to read or write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed spreadsheet: {0}")]
    Parse(String),

    #[error("Invalid operation at line {line}: {reason}")]
    InvalidRow { line: usize, reason: String },

    #[error("The file contains no valid operations")]
    NoOperations,

    #[error("No operations to export")]
    NoData,

    #[error("Failed to encode workbook: {0}")]
    Encode(#[from] toml::ser::Error),
}

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Metrics and operations sheets as typed CSV
    Csv,
    /// Metrics and operations sheets as a TOML workbook
    Toml,
    /// Plain text report
    Report,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Toml => "toml",
            ExportFormat::Report => "txt",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Toml => write!(f, "toml"),
            ExportFormat::Report => write!(f, "report"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" | "spreadsheet" => Ok(ExportFormat::Csv),
            "toml" | "workbook" => Ok(ExportFormat::Toml),
            "report" | "txt" | "text" => Ok(ExportFormat::Report),
            _ => Err(format!(
                "Invalid export format '{}'. Valid formats: csv, toml, report",
                s
            )),
        }
    }
}

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Default export file name, e.g. `analise-gbo-2025-03-15.csv`
pub fn default_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!("analise-gbo-{}.{}", date.format("%Y-%m-%d"), format.extension())
}
