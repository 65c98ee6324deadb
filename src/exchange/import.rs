use crate::exchange::ExchangeError;
use crate::exchange::csv::{self, Cell, Row};
use crate::gbo::{NewOperation, TimeUnit};
use crate::validation;
use std::fs;
use std::path::Path;

/// Words that mark a header row when found in its first cell
const HEADER_KEYWORDS: [&str; 5] = ["operação", "operações", "métrica", "operation", "metric"];

/// Unit of imported times unless a header names another one
const DEFAULT_IMPORT_UNIT: TimeUnit = TimeUnit::Minutes;

fn is_header(first: &str) -> bool {
    let lower = first.to_lowercase();
    HEADER_KEYWORDS.iter().any(|word| lower.contains(word))
}

/// Find a "Tempo (seconds)" style column title in a header row
fn header_unit(row: &Row) -> Option<TimeUnit> {
    row.iter().filter_map(Cell::as_text).find_map(|title| {
        let open = title.find('(')?;
        let close = title[open..].find(')')? + open;
        title[open + 1..close].parse::<TimeUnit>().ok()
    })
}

/// Read operations from CSV text
///
/// Sheets are scanned in order and the first one that yields operations
/// wins. Within a sheet, rows shaped `(text, number, ...)` become operations;
/// header rows are skipped.
///
/// # Errors
/// Any row with an invalid name or time fails the whole import, and a file
/// with no operation rows yields `ExchangeError::NoOperations`.
pub fn operations_from_csv(input: &str) -> Result<Vec<NewOperation>, ExchangeError> {
    let sheets = csv::parse_numbered_sheets(input).map_err(ExchangeError::Parse)?;

    for sheet in &sheets {
        let mut unit = DEFAULT_IMPORT_UNIT;
        let mut operations = Vec::new();

        for (line, row) in sheet {
            let line = *line;
            let (Some(Cell::Text(name)), Some(Cell::Number(time))) = (row.first(), row.get(1))
            else {
                if let Some(Cell::Text(first)) = row.first()
                    && is_header(first)
                    && let Some(found) = header_unit(row)
                {
                    unit = found;
                }
                continue;
            };

            if is_header(name) {
                continue;
            }

            let name = validation::validate_name("name", name).map_err(|e| {
                ExchangeError::InvalidRow {
                    line,
                    reason: e.to_string(),
                }
            })?;
            let time = validation::validate_positive("time", *time).map_err(|e| {
                ExchangeError::InvalidRow {
                    line,
                    reason: e.to_string(),
                }
            })?;
            operations.push(NewOperation { name, time, unit });
        }

        if !operations.is_empty() {
            return Ok(operations);
        }
    }

    Err(ExchangeError::NoOperations)
}

/// Read operations from a CSV file
pub fn import_operations(path: &Path) -> Result<Vec<NewOperation>, ExchangeError> {
    let content = fs::read_to_string(path).map_err(|source| ExchangeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let operations = operations_from_csv(&content)?;
    tracing::info!(path = %path.display(), count = operations.len(), "operations imported");
    Ok(operations)
}
