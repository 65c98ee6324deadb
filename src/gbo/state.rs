use crate::gbo::error::{EngineError, StateError};
use crate::gbo::metrics::{self, MetricsReport};
use crate::gbo::operation::Operation;
use crate::gbo::takt::TaktInput;
use crate::gbo::units::{self, ShiftUnit, TimeUnit};
use crate::validation;
use serde::{Deserialize, Serialize};

/// A change requested by the user or by an import
#[derive(Debug, Clone, PartialEq)]
pub enum LineEvent {
    /// Append an operation; `unit` defaults to the display unit
    AddOperation {
        name: String,
        time: f64,
        unit: Option<TimeUnit>,
    },
    RemoveOperation {
        id: String,
    },
    /// Move an operation to a 0-based position (clamped to the last index)
    MoveOperation {
        id: String,
        position: usize,
    },
    /// Replace the whole sequence (import); every entry gets a fresh id
    ReplaceOperations(Vec<NewOperation>),
    SetDisplayUnit(TimeUnit),
    SetShiftDuration(Option<f64>),
    /// Switch the shift unit, converting an existing duration into it
    ChangeShiftUnit(ShiftUnit),
    SetDailyDemand(Option<f64>),
    SetDemandUnit(String),
    ClearTakt,
}

/// An operation that has no id yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOperation {
    pub name: String,
    pub time: f64,
    pub unit: TimeUnit,
}

/// Session state of the line-balancing tool
///
/// The state is never mutated in place by callers: `apply` consumes the old
/// state and returns the next one, so a failed event leaves the caller's
/// copy intact.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineState {
    pub(crate) operations: Vec<Operation>,
    pub display_unit: TimeUnit,
    pub takt: TaktInput,
    /// Counter for generating unique operation IDs
    pub(crate) next_id: u32,
}

impl LineState {
    pub fn new(display_unit: TimeUnit, demand_unit: impl Into<String>) -> Self {
        Self {
            display_unit,
            takt: TaktInput {
                demand_unit: demand_unit.into(),
                ..TaktInput::default()
            },
            ..Self::default()
        }
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn find_operation(&self, id: &str) -> Option<&Operation> {
        self.operations.iter().find(|op| op.id == id)
    }

    /// ID of the most recently created operation
    pub fn last_id(&self) -> Option<String> {
        (self.next_id > 0).then(|| format!("op-{}", self.next_id))
    }

    fn generate_id(&mut self) -> String {
        self.next_id += 1;
        format!("op-{}", self.next_id)
    }

    /// Takt Time in seconds derived from the current inputs
    pub fn takt_time_seconds(&self) -> Option<f64> {
        self.takt.takt_time_seconds()
    }

    /// Metrics of the current sequence in the current display unit
    pub fn metrics(&self) -> Result<MetricsReport, EngineError> {
        metrics::compute_metrics(&self.operations, self.display_unit, self.takt_time_seconds())
    }

    /// Apply an event and return the next state
    pub fn apply(mut self, event: LineEvent) -> Result<Self, StateError> {
        match event {
            LineEvent::AddOperation { name, time, unit } => {
                let name = validation::validate_name("name", &name)?;
                let time = validation::validate_positive("time", time)?;
                let unit = unit.unwrap_or(self.display_unit);
                let id = self.generate_id();
                tracing::debug!(%id, %name, time, %unit, "operation added");
                self.operations.push(Operation::new(id, name, time, unit));
            }
            LineEvent::RemoveOperation { id } => {
                let index = self.index_of(&id)?;
                let removed = self.operations.remove(index);
                tracing::debug!(id = %removed.id, name = %removed.name, "operation removed");
            }
            LineEvent::MoveOperation { id, position } => {
                let from = self.index_of(&id)?;
                let op = self.operations.remove(from);
                let to = position.min(self.operations.len());
                self.operations.insert(to, op);
                tracing::debug!(%id, from, to, "operation moved");
            }
            LineEvent::ReplaceOperations(incoming) => {
                let mut replaced = Vec::with_capacity(incoming.len());
                for (row, new_op) in incoming.into_iter().enumerate() {
                    let field = format!("operations[{}]", row);
                    let name = validation::validate_name(&field, &new_op.name)?;
                    let time = validation::validate_positive(&field, new_op.time)?;
                    replaced.push((name, time, new_op.unit));
                }
                self.operations.clear();
                for (name, time, unit) in replaced {
                    let id = self.generate_id();
                    self.operations.push(Operation::new(id, name, time, unit));
                }
                tracing::debug!(count = self.operations.len(), "operations replaced");
            }
            LineEvent::SetDisplayUnit(unit) => {
                self.display_unit = unit;
            }
            LineEvent::SetShiftDuration(duration) => {
                self.takt.shift_duration = positive_or_error("shift_duration", duration)?;
            }
            LineEvent::ChangeShiftUnit(unit) => {
                let previous = self.takt.shift_unit;
                self.takt.shift_duration = self
                    .takt
                    .shift_duration
                    .map(|value| units::convert_time(value, previous, unit));
                self.takt.shift_unit = unit;
            }
            LineEvent::SetDailyDemand(demand) => {
                self.takt.daily_demand = positive_or_error("daily_demand", demand)?;
            }
            LineEvent::SetDemandUnit(label) => {
                let label = label.trim();
                if label.is_empty() {
                    return Err(validation::ValidationError::new("demand_unit", "required").into());
                }
                self.takt.demand_unit = label.to_string();
            }
            LineEvent::ClearTakt => {
                self.takt = TaktInput {
                    demand_unit: self.takt.demand_unit.clone(),
                    ..TaktInput::default()
                };
            }
        }
        Ok(self)
    }

    fn index_of(&self, id: &str) -> Result<usize, StateError> {
        self.operations
            .iter()
            .position(|op| op.id == id)
            .ok_or_else(|| StateError::NotFound(id.to_string()))
    }
}

fn positive_or_error(field: &str, value: Option<f64>) -> Result<Option<f64>, StateError> {
    value
        .map(|v| validation::validate_positive(field, v))
        .transpose()
        .map_err(StateError::from)
}
