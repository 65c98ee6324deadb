//! Aggregate metrics and bottleneck classification
//!
//! Every operation is normalized to seconds, aggregated there at full
//! precision, and converted back to the caller's display unit. Rounding is
//! left to formatting and export.

use crate::gbo::error::EngineError;
use crate::gbo::operation::Operation;
use crate::gbo::units::{self, TimeUnit};
use serde::Serialize;

/// Presentation tier of a single operation
///
/// "Exceeds Takt" outranks "is the maximum", which outranks "normal".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarTier {
    Normal,
    MaxTime,
    ExceedsTakt,
}

/// Per-operation result of the classification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationMetrics {
    pub id: String,
    pub name: String,
    /// Time in the display unit
    pub time: f64,
    pub time_seconds: f64,
    /// Unit the operation was entered in
    pub original_unit: TimeUnit,
    /// Time equals the sequence maximum (ties are all flagged)
    pub is_max_time: bool,
    /// Takt Time is defined and strictly exceeded
    pub exceeds_takt: bool,
    /// Share of the total time, in percent
    pub share_of_total: f64,
}

impl OperationMetrics {
    /// Combined flag used by the export "Status" column
    pub fn is_bottleneck(&self) -> bool {
        self.is_max_time || self.exceeds_takt
    }

    pub fn tier(&self) -> BarTier {
        if self.exceeds_takt {
            BarTier::ExceedsTakt
        } else if self.is_max_time {
            BarTier::MaxTime
        } else {
            BarTier::Normal
        }
    }
}

/// The headline bottleneck: first operation in sequence order with the maximum time
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bottleneck {
    pub id: String,
    pub name: String,
    /// Time in the display unit
    pub time: f64,
}

/// Metrics of a non-empty operation sequence, expressed in `display_unit`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub display_unit: TimeUnit,
    pub total_time: f64,
    pub operation_count: usize,
    pub average_time: f64,
    pub bottleneck: Bottleneck,
    /// Takt Time in the display unit, if defined
    pub takt_time: Option<f64>,
    pub total_seconds: f64,
    pub average_seconds: f64,
    pub max_seconds: f64,
    pub takt_time_seconds: Option<f64>,
    pub per_operation: Vec<OperationMetrics>,
}

/// Result of a metrics computation
///
/// An empty sequence has no average and no bottleneck, so it yields
/// `NoData` instead of zero-filled numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MetricsReport {
    NoData,
    Ready(Box<Metrics>),
}

impl MetricsReport {
    pub fn operation_count(&self) -> usize {
        match self {
            MetricsReport::NoData => 0,
            MetricsReport::Ready(metrics) => metrics.operation_count,
        }
    }

    pub fn metrics(&self) -> Option<&Metrics> {
        match self {
            MetricsReport::NoData => None,
            MetricsReport::Ready(metrics) => Some(metrics),
        }
    }

    pub fn into_metrics(self) -> Option<Metrics> {
        match self {
            MetricsReport::NoData => None,
            MetricsReport::Ready(metrics) => Some(*metrics),
        }
    }
}

/// Compute aggregate metrics and per-operation flags
///
/// # Arguments
/// * `operations` - Sequence in display order
/// * `display_unit` - Unit for every time field of the result
/// * `takt_time_seconds` - Optional Takt Time, already in seconds
///
/// # Returns
/// `MetricsReport::NoData` for an empty sequence, or an
/// `EngineError::InvalidInput` if any time is NaN, infinite or not positive,
/// or if the times add up past the range of `f64`.
pub fn compute_metrics(
    operations: &[Operation],
    display_unit: TimeUnit,
    takt_time_seconds: Option<f64>,
) -> Result<MetricsReport, EngineError> {
    if let Some(takt) = takt_time_seconds
        && !(takt.is_finite() && takt > 0.0)
    {
        return Err(EngineError::invalid("Takt Time", takt));
    }

    let mut seconds = Vec::with_capacity(operations.len());
    for op in operations {
        let t = op.seconds();
        if !(t.is_finite() && t > 0.0) {
            return Err(EngineError::invalid(&op.name, op.time));
        }
        seconds.push(t);
    }

    // First index holding the maximum; later ties do not replace it
    let Some(bottleneck_index) = seconds
        .iter()
        .enumerate()
        .fold(None, |best: Option<usize>, (i, &t)| match best {
            Some(b) if seconds[b] >= t => Some(b),
            _ => Some(i),
        })
    else {
        return Ok(MetricsReport::NoData);
    };

    let total_seconds: f64 = seconds.iter().sum();
    if !total_seconds.is_finite() {
        return Err(EngineError::invalid("Total time", total_seconds));
    }
    let operation_count = operations.len();
    let average_seconds = total_seconds / operation_count as f64;
    let max_seconds = seconds[bottleneck_index];

    let per_operation = operations
        .iter()
        .zip(&seconds)
        .map(|(op, &t)| OperationMetrics {
            id: op.id.clone(),
            name: op.name.clone(),
            time: units::from_seconds(t, display_unit),
            time_seconds: t,
            original_unit: op.unit,
            is_max_time: t == max_seconds,
            exceeds_takt: takt_time_seconds.is_some_and(|takt| t > takt),
            share_of_total: t / total_seconds * 100.0,
        })
        .collect();

    let head = &operations[bottleneck_index];
    Ok(MetricsReport::Ready(Box::new(Metrics {
        display_unit,
        total_time: units::from_seconds(total_seconds, display_unit),
        operation_count,
        average_time: units::from_seconds(average_seconds, display_unit),
        bottleneck: Bottleneck {
            id: head.id.clone(),
            name: head.name.clone(),
            time: units::from_seconds(max_seconds, display_unit),
        },
        takt_time: takt_time_seconds.map(|takt| units::from_seconds(takt, display_unit)),
        total_seconds,
        average_seconds,
        max_seconds,
        takt_time_seconds,
        per_operation,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(id: &str, name: &str, time: f64, unit: TimeUnit) -> Operation {
        Operation::new(id, name, time, unit)
    }

    fn abc() -> Vec<Operation> {
        vec![
            op("op-1", "A", 5.0, TimeUnit::Minutes),
            op("op-2", "B", 2.0, TimeUnit::Minutes),
            op("op-3", "C", 10.0, TimeUnit::Minutes),
        ]
    }

    fn ready(report: MetricsReport) -> Metrics {
        report.into_metrics().expect("metrics should be computed")
    }

    #[test]
    fn test_aggregate_metrics_in_minutes() {
        let m = ready(compute_metrics(&abc(), TimeUnit::Minutes, None).unwrap());
        assert_eq!(m.total_time, 17.0);
        assert_eq!(m.operation_count, 3);
        assert!((m.average_time - 17.0 / 3.0).abs() < 1e-12);
        assert_eq!(format!("{:.2}", m.average_time), "5.67");
        assert_eq!(m.bottleneck.name, "C");
        assert_eq!(m.bottleneck.time, 10.0);
        assert_eq!(m.takt_time, None);

        let flags: Vec<bool> = m.per_operation.iter().map(|o| o.is_max_time).collect();
        assert_eq!(flags, vec![false, false, true]);
        assert!(m.per_operation.iter().all(|o| !o.exceeds_takt));
    }

    #[test]
    fn test_same_metrics_in_seconds() {
        let m = ready(compute_metrics(&abc(), TimeUnit::Seconds, None).unwrap());
        assert_eq!(m.total_time, 1020.0);
        assert_eq!(m.average_time, 340.0);
        assert_eq!(m.bottleneck.time, 600.0);
    }

    #[test]
    fn test_exceeds_takt_outranks_max() {
        let m = ready(compute_metrics(&abc(), TimeUnit::Minutes, Some(360.0)).unwrap());
        let exceeds: Vec<bool> = m.per_operation.iter().map(|o| o.exceeds_takt).collect();
        assert_eq!(exceeds, vec![false, false, true]);
        assert_eq!(m.per_operation[2].tier(), BarTier::ExceedsTakt);
        assert_eq!(m.per_operation[0].tier(), BarTier::Normal);
        assert_eq!(m.takt_time, Some(6.0));
    }

    #[test]
    fn test_max_within_takt_is_middle_tier() {
        let m = ready(compute_metrics(&abc(), TimeUnit::Minutes, Some(900.0)).unwrap());
        assert_eq!(m.per_operation[2].tier(), BarTier::MaxTime);
        assert!(m.per_operation[2].is_bottleneck());
        assert!(!m.per_operation[1].is_bottleneck());
    }

    #[test]
    fn test_equal_to_takt_does_not_exceed() {
        let m = ready(compute_metrics(&abc(), TimeUnit::Minutes, Some(300.0)).unwrap());
        // A is exactly 5 minutes
        assert!(!m.per_operation[0].exceeds_takt);
        assert!(m.per_operation[2].exceeds_takt);
    }

    #[test]
    fn test_exceeding_takt_without_being_max_is_bottleneck() {
        let m = ready(compute_metrics(&abc(), TimeUnit::Minutes, Some(240.0)).unwrap());
        assert!(m.per_operation[0].exceeds_takt);
        assert!(!m.per_operation[0].is_max_time);
        assert!(m.per_operation[0].is_bottleneck());
        assert_eq!(m.bottleneck.name, "C");
    }

    #[test]
    fn test_tie_flags_every_max_and_reports_first() {
        let ops = vec![
            op("op-1", "A", 5.0, TimeUnit::Minutes),
            op("op-2", "B", 5.0, TimeUnit::Minutes),
        ];
        let m = ready(compute_metrics(&ops, TimeUnit::Minutes, None).unwrap());
        assert!(m.per_operation.iter().all(|o| o.is_max_time));
        assert_eq!(m.bottleneck.id, "op-1");
        assert_eq!(m.per_operation.len(), 2);
    }

    #[test]
    fn test_tie_across_units() {
        let ops = vec![
            op("op-1", "X", 60.0, TimeUnit::Seconds),
            op("op-2", "Y", 1.0, TimeUnit::Minutes),
        ];
        let m = ready(compute_metrics(&ops, TimeUnit::Seconds, None).unwrap());
        assert!(m.per_operation[0].is_max_time && m.per_operation[1].is_max_time);
        assert_eq!(m.bottleneck.name, "X");
    }

    #[test]
    fn test_empty_sequence_is_no_data() {
        let report = compute_metrics(&[], TimeUnit::Minutes, None).unwrap();
        assert_eq!(report, MetricsReport::NoData);
        assert_eq!(report.operation_count(), 0);
        assert!(report.metrics().is_none());

        let with_takt = compute_metrics(&[], TimeUnit::Seconds, Some(288.0)).unwrap();
        assert_eq!(with_takt, MetricsReport::NoData);
    }

    #[test]
    fn test_share_of_total() {
        let m = ready(compute_metrics(&abc(), TimeUnit::Minutes, None).unwrap());
        let total: f64 = m.per_operation.iter().map(|o| o.share_of_total).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert_eq!(format!("{:.1}", m.per_operation[2].share_of_total), "58.8");
    }

    #[test]
    fn test_invalid_inputs_are_labeled() {
        let ops = vec![op("op-1", "Broken", f64::NAN, TimeUnit::Minutes)];
        let err = compute_metrics(&ops, TimeUnit::Minutes, None).unwrap_err();
        assert!(err.to_string().contains("Broken"));

        let ops = vec![op("op-1", "Zero", 0.0, TimeUnit::Seconds)];
        assert!(compute_metrics(&ops, TimeUnit::Minutes, None).is_err());

        let err = compute_metrics(&abc(), TimeUnit::Minutes, Some(f64::INFINITY)).unwrap_err();
        assert!(err.to_string().contains("Takt Time"));
    }

    #[test]
    fn test_overflowing_total_is_invalid() {
        let ops = vec![
            op("op-1", "Aa", 1e308, TimeUnit::Seconds),
            op("op-2", "Bb", 1e308, TimeUnit::Seconds),
        ];
        let err = compute_metrics(&ops, TimeUnit::Seconds, None).unwrap_err();
        assert!(err.to_string().contains("Total time"));
    }

    #[test]
    fn test_computation_is_repeatable() {
        let ops = abc();
        let first = compute_metrics(&ops, TimeUnit::Minutes, Some(360.0)).unwrap();
        let second = compute_metrics(&ops, TimeUnit::Minutes, Some(360.0)).unwrap();
        assert_eq!(first, second);
    }
}
