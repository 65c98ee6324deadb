use crate::gbo::units::{self, TimeUnit};
use serde::{Deserialize, Serialize};

/// A named unit of work on the line with its duration
///
/// Fields never change after creation. The owning sequence may reorder or
/// drop an operation, but editing one means removing it and adding a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Opaque identifier, unique within a sequence (e.g., "op-3")
    pub id: String,
    /// Workstation or step name (e.g., "Montagem", "Soldagem")
    pub name: String,
    /// Duration expressed in `unit`
    pub time: f64,
    /// Unit the duration was entered in
    pub unit: TimeUnit,
}

impl Operation {
    pub fn new(id: impl Into<String>, name: impl Into<String>, time: f64, unit: TimeUnit) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            time,
            unit,
        }
    }

    /// Duration normalized to seconds
    pub fn seconds(&self) -> f64 {
        units::to_seconds(self.time, self.unit)
    }

    /// Duration expressed in the given display unit
    pub fn time_in(&self, unit: TimeUnit) -> f64 {
        units::from_seconds(self.seconds(), unit)
    }
}
