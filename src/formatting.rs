//! Formatting helper functions for GBO MCP server
//!
//! This module turns engine results into the text returned by the tools.
//! All rounding to one decimal place happens here.

use crate::gbo::{BarTier, ChartData, LineState, MetricsReport, TaktInput, TimeUnit};

/// Width of the longest bar in the text chart
const CHART_WIDTH: usize = 40;

/// Round for display with one decimal place
pub fn one_decimal(value: f64) -> String {
    format!("{:.1}", value)
}

/// Format the operation sequence in display order
///
/// # Arguments
/// * `state` - Current line state
///
/// # Returns
/// One line per operation with its display-unit time and original entry
pub fn format_operations(state: &LineState) -> String {
    let operations = state.operations();
    if operations.is_empty() {
        return "No operations added".to_string();
    }

    let unit = state.display_unit;
    let mut result = format!("Found {} operation(s):\n\n", operations.len());
    for (i, op) in operations.iter().enumerate() {
        result.push_str(&format!(
            "{}. [{}] {}: {} {}",
            i + 1,
            op.id,
            op.name,
            one_decimal(op.time_in(unit)),
            unit
        ));
        if op.unit != unit {
            result.push_str(&format!(" (entered as {} {})", one_decimal(op.time), op.unit));
        }
        result.push('\n');
    }
    result
}

/// Format the metrics dashboard
///
/// Returns a "nothing to display" notice for an empty sequence instead of
/// zero-filled numbers.
pub fn format_dashboard(report: &MetricsReport, takt: &TaktInput) -> String {
    let Some(metrics) = report.metrics() else {
        return "No operations added: nothing to display".to_string();
    };

    let unit = metrics.display_unit;
    let mut result = String::from("GBO metrics:\n");
    result.push_str(&format!("  Total time: {} {}\n", one_decimal(metrics.total_time), unit));
    result.push_str(&format!("  Operations: {}\n", metrics.operation_count));
    result.push_str(&format!(
        "  Average time: {} {}\n",
        one_decimal(metrics.average_time),
        unit
    ));
    result.push_str(&format!(
        "  Bottleneck: {} ({} {})\n",
        metrics.bottleneck.name,
        one_decimal(metrics.bottleneck.time),
        unit
    ));
    match metrics.takt_time {
        Some(takt_time) => result.push_str(&format!(
            "  Takt Time: {} {}/{}\n",
            one_decimal(takt_time),
            unit,
            takt.demand_unit.to_lowercase()
        )),
        None => result.push_str("  Takt Time: -\n"),
    }

    let flagged: Vec<&str> = metrics
        .per_operation
        .iter()
        .filter(|op| op.exceeds_takt)
        .map(|op| op.name.as_str())
        .collect();
    if !flagged.is_empty() {
        result.push_str(&format!("  Exceeding Takt Time: {}\n", flagged.join(", ")));
    }

    result
}

/// Format the Takt Time in the shift unit (two decimals, as in the input form)
pub fn format_takt(takt: &TaktInput) -> String {
    match takt.takt_time_in_shift_unit() {
        Some(value) => format!(
            "Takt Time: {:.2} {}/{}",
            value,
            takt.shift_unit,
            takt.demand_unit.to_lowercase()
        ),
        None => "Takt Time not defined (shift duration and daily demand must both be greater than 0)"
            .to_string(),
    }
}

fn tier_label(tier: BarTier) -> &'static str {
    match tier {
        BarTier::ExceedsTakt => "exceeds takt",
        BarTier::MaxTime => "bottleneck",
        BarTier::Normal => "normal",
    }
}

fn tier_glyph(tier: BarTier) -> char {
    match tier {
        BarTier::ExceedsTakt => '!',
        BarTier::MaxTime => '#',
        BarTier::Normal => '=',
    }
}

/// Render the chart model as horizontal text bars
pub fn format_chart(chart: &ChartData) -> String {
    if chart.bars.is_empty() {
        return "No operations added: nothing to display".to_string();
    }

    let name_width = chart
        .bars
        .iter()
        .map(|bar| bar.name.chars().count())
        .max()
        .unwrap_or(0);
    let scale = if chart.y_axis_max > 0.0 {
        CHART_WIDTH as f64 / chart.y_axis_max
    } else {
        0.0
    };

    let mut result = format!("GBO chart ({}):\n\n", chart.unit);
    for bar in &chart.bars {
        let len = (bar.time * scale).round() as usize;
        let glyph = tier_glyph(bar.tier).to_string().repeat(len.max(1));
        result.push_str(&format!(
            "{:>2}. {:<width$} |{} {} [{}]\n",
            bar.index,
            bar.name,
            glyph,
            one_decimal(bar.time),
            tier_label(bar.tier),
            width = name_width
        ));
    }

    result.push('\n');
    result.push_str(&format!("Average: {} {}\n", one_decimal(chart.average_line), chart.unit));
    if let Some(takt) = chart.takt_line {
        result.push_str(&format!("Takt Time: {} {}\n", one_decimal(takt), chart.unit));
    }
    result
}

/// Label for a display unit in column headers (e.g., "Tempo (minutes)")
pub fn time_header(unit: TimeUnit) -> String {
    format!("Tempo ({})", unit)
}
