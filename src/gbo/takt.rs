use crate::gbo::units::{self, ShiftUnit};
use serde::{Deserialize, Serialize};

/// Default label for the demand quantity ("pieces")
pub const DEFAULT_DEMAND_UNIT: &str = "peças";

/// Inputs of the Takt Time calculation
///
/// Both numbers are optional: the Takt feature is simply absent until the
/// shift duration and the daily demand are known and strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaktInput {
    pub shift_duration: Option<f64>,
    pub shift_unit: ShiftUnit,
    pub daily_demand: Option<f64>,
    /// Free-form label for the demand quantity, display only
    pub demand_unit: String,
}

impl Default for TaktInput {
    fn default() -> Self {
        Self {
            shift_duration: None,
            shift_unit: ShiftUnit::Minutes,
            daily_demand: None,
            demand_unit: DEFAULT_DEMAND_UNIT.to_string(),
        }
    }
}

impl TaktInput {
    /// Takt Time in seconds, if defined
    pub fn takt_time_seconds(&self) -> Option<f64> {
        compute_takt_time_seconds(self.shift_duration?, self.shift_unit, self.daily_demand?)
    }

    /// Takt Time expressed in the shift unit, if defined
    pub fn takt_time_in_shift_unit(&self) -> Option<f64> {
        self.takt_time_seconds()
            .map(|seconds| units::convert_time(seconds, ShiftUnit::Seconds, self.shift_unit))
    }
}

/// Takt Time in seconds: available shift time divided by daily demand
///
/// Returns `None` unless both inputs are finite and strictly positive.
pub fn compute_takt_time_seconds(
    shift_duration: f64,
    shift_unit: ShiftUnit,
    daily_demand: f64,
) -> Option<f64> {
    if !is_positive(shift_duration) || !is_positive(daily_demand) {
        return None;
    }

    let shift_seconds = units::convert_time(shift_duration, shift_unit, ShiftUnit::Seconds);
    Some(shift_seconds / daily_demand)
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
