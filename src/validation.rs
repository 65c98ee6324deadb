//! Input validation for the GBO MCP server
//!
//! Names, numbers and unit strings are checked here, before anything reaches
//! the calculation engine. Failures are field-level so the caller can report
//! which input was wrong.

use crate::gbo::{ShiftUnit, TimeUnit};
use mcp_attr::Result as McpResult;
use thiserror::Error;

/// Minimum length of an operation name, after trimming
pub const MIN_NAME_LEN: usize = 2;

/// A rejected input field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate an operation name
///
/// # Returns
/// The trimmed name, or an error if it is empty or shorter than 2 characters
pub fn validate_name(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "required"));
    }
    if trimmed.chars().count() < MIN_NAME_LEN {
        return Err(ValidationError::new(
            field,
            format!("minimum {} characters", MIN_NAME_LEN),
        ));
    }
    Ok(trimmed.to_string())
}

/// Validate a numeric value that must be finite and strictly positive
pub fn validate_positive(field: &str, value: f64) -> Result<f64, ValidationError> {
    if value.is_nan() {
        return Err(ValidationError::new(field, "must be a valid number"));
    }
    if !value.is_finite() || value <= 0.0 {
        return Err(ValidationError::new(field, "must be greater than 0"));
    }
    Ok(value)
}

/// Parse and validate numeric text (e.g., a spreadsheet cell or CLI value)
///
/// # Examples
/// ```
/// # use gbo_mcp::validation::parse_positive;
/// assert_eq!(parse_positive("time", " 4.5 ").unwrap(), 4.5);
/// assert!(parse_positive("time", "abc").is_err());
/// assert!(parse_positive("time", "0").is_err());
/// ```
pub fn parse_positive(field: &str, value: &str) -> Result<f64, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, "required"));
    }
    let number = trimmed
        .parse::<f64>()
        .map_err(|_| ValidationError::new(field, "must be a valid number"))?;
    validate_positive(field, number)
}

/// Parse a time unit parameter (minutes/seconds)
pub fn parse_time_unit(unit_str: &str) -> McpResult<TimeUnit> {
    unit_str.parse::<TimeUnit>().map_err(invalid_params)
}

/// Parse a shift unit parameter (minutes/seconds/hours)
pub fn parse_shift_unit(unit_str: &str) -> McpResult<ShiftUnit> {
    unit_str.parse::<ShiftUnit>().map_err(invalid_params)
}

/// Convert a message into an MCP "invalid params" error visible to the client
pub fn invalid_params(message: impl std::fmt::Display) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(message.to_string(), true)
}
