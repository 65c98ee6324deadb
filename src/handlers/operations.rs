//! Operation handlers for GBO MCP server

use crate::GboServerHandler;
use crate::formatting;
use crate::gbo::LineEvent;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl GboServerHandler {
    /// Adds an operation at the end of the sequence and reports its generated ID.
    pub async fn handle_add_operation(
        &self,
        name: String,
        time: f64,
        unit: Option<String>,
    ) -> McpResult<String> {
        let unit = unit
            .as_deref()
            .map(validation::parse_time_unit)
            .transpose()?;

        let state = self.transition([LineEvent::AddOperation { name, time, unit }])?;

        // The new operation is always the last one
        let Some(op) = state.operations().last() else {
            bail_public!(_, "Failed to add operation");
        };
        Ok(format!(
            "Operation created with ID: {} ({}: {} {})",
            op.id,
            op.name,
            formatting::one_decimal(op.time),
            op.unit
        ))
    }

    /// Removes an operation by ID.
    pub async fn handle_remove_operation(&self, id: String) -> McpResult<String> {
        let id = id.trim().to_string();
        let name = self
            .snapshot()?
            .find_operation(&id)
            .map(|op| op.name.clone())
            .unwrap_or_default();

        self.transition([LineEvent::RemoveOperation { id: id.clone() }])?;
        Ok(format!("Operation {} ({}) removed", id, name))
    }

    /// Moves an operation to a 1-based position; positions past the end move it last.
    pub async fn handle_move_operation(&self, id: String, position: usize) -> McpResult<String> {
        if position == 0 {
            bail_public!(_, "Invalid position 0. Positions start at 1.");
        }

        let id = id.trim().to_string();
        let state = self.transition([LineEvent::MoveOperation {
            id: id.clone(),
            position: position - 1,
        }])?;

        let actual = state
            .operations()
            .iter()
            .position(|op| op.id == id)
            .map_or(position, |index| index + 1);
        Ok(format!(
            "Operation {} moved to position {}\n\n{}",
            id,
            actual,
            formatting::format_operations(&state)
        ))
    }

    /// Lists operations in sequence order using the display unit.
    pub async fn handle_list_operations(&self) -> McpResult<String> {
        let state = self.snapshot()?;
        Ok(formatting::format_operations(&state))
    }
}
