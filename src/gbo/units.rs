use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const SECONDS_PER_MINUTE: f64 = 60.0;
const MINUTES_PER_HOUR: f64 = 60.0;

/// Unit of an operation time and of the global display unit
///
/// Seconds are the canonical base for every calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    #[default]
    Minutes,
    Seconds,
}

/// Unit of the shift duration input used for Takt Time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftUnit {
    #[default]
    Minutes,
    Seconds,
    Hours,
}

/// Convert a value expressed in `unit` into seconds
pub fn to_seconds(value: f64, unit: TimeUnit) -> f64 {
    match unit {
        TimeUnit::Minutes => value * SECONDS_PER_MINUTE,
        TimeUnit::Seconds => value,
    }
}

/// Convert a value in seconds into `unit`
pub fn from_seconds(seconds: f64, unit: TimeUnit) -> f64 {
    match unit {
        TimeUnit::Minutes => seconds / SECONDS_PER_MINUTE,
        TimeUnit::Seconds => seconds,
    }
}

/// General conversion between any two shift units
///
/// Conversions chain through minutes, so hours to seconds is `(v * 60) * 60`.
/// Converting a value into its own unit returns it untouched.
pub fn convert_time(value: f64, from: ShiftUnit, to: ShiftUnit) -> f64 {
    if from == to {
        return value;
    }

    let minutes = match from {
        ShiftUnit::Minutes => value,
        ShiftUnit::Hours => value * MINUTES_PER_HOUR,
        ShiftUnit::Seconds => value / SECONDS_PER_MINUTE,
    };

    match to {
        ShiftUnit::Minutes => minutes,
        ShiftUnit::Hours => minutes / MINUTES_PER_HOUR,
        ShiftUnit::Seconds => minutes * SECONDS_PER_MINUTE,
    }
}

impl TimeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Minutes => "minutes",
            TimeUnit::Seconds => "seconds",
        }
    }
}

impl ShiftUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShiftUnit::Minutes => "minutes",
            ShiftUnit::Seconds => "seconds",
            ShiftUnit::Hours => "hours",
        }
    }
}

impl From<TimeUnit> for ShiftUnit {
    fn from(unit: TimeUnit) -> Self {
        match unit {
            TimeUnit::Minutes => ShiftUnit::Minutes,
            TimeUnit::Seconds => ShiftUnit::Seconds,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ShiftUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minutes" | "minute" | "min" | "m" | "minutos" => Ok(TimeUnit::Minutes),
            "seconds" | "second" | "sec" | "s" | "segundos" | "seg" => Ok(TimeUnit::Seconds),
            _ => Err(format!(
                "Invalid time unit '{}'. Valid units: minutes, seconds",
                s
            )),
        }
    }
}

impl FromStr for ShiftUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hours" | "hour" | "h" | "horas" => Ok(ShiftUnit::Hours),
            other => other.parse::<TimeUnit>().map(ShiftUnit::from).map_err(|_| {
                format!(
                    "Invalid shift unit '{}'. Valid units: minutes, seconds, hours",
                    s
                )
            }),
        }
    }
}
