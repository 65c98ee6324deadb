//! Line-balancing domain models and calculations
//!
//! This module contains the GBO calculation engine and session state.
//! It is split into submodules:
//! - `units`: time-unit normalization (seconds are the canonical base)
//! - `operation`: the Operation record
//! - `takt`: Takt Time inputs and derivation
//! - `metrics`: aggregate metrics and bottleneck classification
//! - `chart`: bar tiers and reference lines for chart consumers
//! - `state`: immutable-per-update session state and its events

mod chart;
mod error;
mod metrics;
mod operation;
mod state;
mod takt;
mod units;

// Re-export all public types
pub use chart::{ChartBar, ChartData};
pub use error::{EngineError, StateError};
pub use metrics::{BarTier, Bottleneck, Metrics, MetricsReport, OperationMetrics, compute_metrics};
pub use operation::Operation;
pub use state::{LineEvent, LineState, NewOperation};
pub use takt::{DEFAULT_DEMAND_UNIT, TaktInput, compute_takt_time_seconds};
pub use units::{ShiftUnit, TimeUnit, convert_time, from_seconds, to_seconds};
