use thiserror::Error;

/// Errors raised by the calculation engine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid input: {what} has time {value}, expected a finite value greater than 0")]
    InvalidInput { what: String, value: f64 },
}

impl EngineError {
    pub(crate) fn invalid(what: impl Into<String>, value: f64) -> Self {
        EngineError::InvalidInput {
            what: what.into(),
            value,
        }
    }
}

/// Errors raised by line state transitions
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StateError {
    #[error("Operation '{0}' not found")]
    NotFound(String),

    #[error(transparent)]
    Validation(#[from] crate::validation::ValidationError),
}
