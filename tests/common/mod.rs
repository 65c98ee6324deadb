//! Common test utilities for integration tests

#![allow(dead_code)]

use gbo_mcp::gbo::{LineEvent, LineState, Operation, TimeUnit};
use gbo_mcp::{Config, GboServerHandler};

/// Create a test handler with an empty session
pub fn get_test_handler() -> GboServerHandler {
    GboServerHandler::new(Config::default())
}

/// Build an operation with a fixed ID
pub fn op(id: &str, name: &str, time: f64, unit: TimeUnit) -> Operation {
    Operation::new(id, name, time, unit)
}

/// The A/B/C line: 5, 2 and 10 minutes
pub fn abc_operations() -> Vec<Operation> {
    vec![
        op("op-1", "A", 5.0, TimeUnit::Minutes),
        op("op-2", "B", 2.0, TimeUnit::Minutes),
        op("op-3", "C", 10.0, TimeUnit::Minutes),
    ]
}

/// State holding the given (name, time, unit) operations in order
pub fn state_with(operations: &[(&str, f64, TimeUnit)]) -> LineState {
    operations
        .iter()
        .fold(LineState::default(), |state, &(name, time, unit)| {
            state
                .apply(LineEvent::AddOperation {
                    name: name.to_string(),
                    time,
                    unit: Some(unit),
                })
                .unwrap()
        })
}

/// Extract ID from add_operation() response message
/// Response format: "Operation created with ID: <id> (<name>: <time> <unit>)"
pub fn extract_id_from_response(response: &str) -> String {
    if let Some(start) = response.find("ID: ") {
        let id_part = &response[start + 4..];
        if let Some(end) = id_part.find(" (") {
            return id_part[..end].trim().to_string();
        }
    }
    response
        .split_whitespace()
        .last()
        .unwrap_or("")
        .trim_end_matches(')')
        .to_string()
}
