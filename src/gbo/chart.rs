use crate::gbo::metrics::{BarTier, Metrics};
use crate::gbo::units::TimeUnit;
use serde::Serialize;

/// Headroom above the tallest bar or the Takt line
const AXIS_PADDING: f64 = 1.1;

/// One bar of the balance chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    /// 1-based position in the sequence
    pub index: usize,
    pub name: String,
    /// Time in the display unit
    pub time: f64,
    pub original_unit: TimeUnit,
    pub tier: BarTier,
}

/// Chart model: bars plus the average and Takt reference lines
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub unit: TimeUnit,
    pub bars: Vec<ChartBar>,
    pub average_line: f64,
    pub takt_line: Option<f64>,
    pub y_axis_max: f64,
}

impl ChartData {
    pub fn from_metrics(metrics: &Metrics) -> Self {
        let bars: Vec<ChartBar> = metrics
            .per_operation
            .iter()
            .enumerate()
            .map(|(i, op)| ChartBar {
                index: i + 1,
                name: op.name.clone(),
                time: op.time,
                original_unit: op.original_unit,
                tier: op.tier(),
            })
            .collect();

        let tallest = bars.iter().map(|bar| bar.time).fold(0.0, f64::max);
        let takt_padded = metrics.takt_time.map_or(0.0, |takt| takt * AXIS_PADDING);

        Self {
            unit: metrics.display_unit,
            bars,
            average_line: metrics.average_time,
            takt_line: metrics.takt_time,
            y_axis_max: f64::max(tallest * AXIS_PADDING, takt_padded),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gbo::metrics::compute_metrics;
    use crate::gbo::operation::Operation;

    fn ops() -> Vec<Operation> {
        vec![
            Operation::new("op-1", "A", 5.0, TimeUnit::Minutes),
            Operation::new("op-2", "B", 2.0, TimeUnit::Minutes),
            Operation::new("op-3", "C", 10.0, TimeUnit::Minutes),
        ]
    }

    #[test]
    fn test_chart_tiers_and_lines() {
        let metrics = compute_metrics(&ops(), TimeUnit::Minutes, Some(360.0))
            .unwrap()
            .into_metrics()
            .unwrap();
        let chart = ChartData::from_metrics(&metrics);

        let tiers: Vec<BarTier> = chart.bars.iter().map(|b| b.tier).collect();
        assert_eq!(tiers, vec![BarTier::Normal, BarTier::Normal, BarTier::ExceedsTakt]);
        assert_eq!(chart.bars[2].index, 3);
        assert_eq!(chart.takt_line, Some(6.0));
        assert!((chart.average_line - 17.0 / 3.0).abs() < 1e-12);
        assert!((chart.y_axis_max - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_axis_fits_takt_above_bars() {
        let metrics = compute_metrics(&ops(), TimeUnit::Minutes, Some(1200.0))
            .unwrap()
            .into_metrics()
            .unwrap();
        let chart = ChartData::from_metrics(&metrics);
        assert!((chart.y_axis_max - 22.0).abs() < 1e-9);
        assert_eq!(chart.bars[2].tier, BarTier::MaxTime);
    }
}
