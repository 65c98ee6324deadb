use crate::exchange::csv::{self, Cell, Sheet};
use crate::exchange::{ExchangeError, ExportFormat};
use crate::formatting::{one_decimal, time_header};
use crate::gbo::{Metrics, Operation, TaktInput, TimeUnit};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use std::path::Path;

const REPORT_TITLE: &str = "Análise GBO - Gráfico de Balanceamento de Operações";
const STATUS_BOTTLENECK: &str = "Gargalo";
const STATUS_NORMAL: &str = "Normal";

/// Summary sheet of an export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSheet {
    pub unit: TimeUnit,
    pub total_time: String,
    pub operation_count: usize,
    pub average_time: String,
    pub bottleneck: String,
    pub bottleneck_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub takt_time: Option<String>,
    pub demand_unit: String,
    pub export_date: String,
}

/// One line of the operations sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperationRow {
    pub name: String,
    /// Time in the display unit
    pub time: f64,
    /// Time as entered, e.g. "5.0 minutes"
    pub original: String,
    /// "Gargalo" when the operation is the maximum or exceeds Takt Time
    pub status: String,
    /// Share of the total time, e.g. "58.8%"
    pub share_of_total: String,
}

/// Everything an export writes, independent of the file format
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Workbook {
    pub title: String,
    pub metrics: MetricsSheet,
    pub operations: Vec<OperationRow>,
}

/// Assemble the export content from the raw operations and their metrics
///
/// `operations` and `metrics.per_operation` must describe the same sequence
/// in the same order.
pub fn build_workbook(
    operations: &[Operation],
    metrics: &Metrics,
    takt: &TaktInput,
    date: NaiveDate,
) -> Workbook {
    let unit = metrics.display_unit;
    let rows = operations
        .iter()
        .zip(&metrics.per_operation)
        .map(|(op, m)| OperationRow {
            name: op.name.clone(),
            time: m.time,
            original: format!("{} {}", one_decimal(op.time), op.unit),
            status: if m.is_bottleneck() {
                STATUS_BOTTLENECK
            } else {
                STATUS_NORMAL
            }
            .to_string(),
            share_of_total: format!("{}%", one_decimal(m.share_of_total)),
        })
        .collect();

    Workbook {
        title: REPORT_TITLE.to_string(),
        metrics: MetricsSheet {
            unit,
            total_time: one_decimal(metrics.total_time),
            operation_count: metrics.operation_count,
            average_time: one_decimal(metrics.average_time),
            bottleneck: metrics.bottleneck.name.clone(),
            bottleneck_time: one_decimal(metrics.bottleneck.time),
            takt_time: metrics.takt_time.map(one_decimal),
            demand_unit: takt.demand_unit.clone(),
            export_date: date.format("%d/%m/%Y").to_string(),
        },
        operations: rows,
    }
}

/// Render the workbook as two CSV sheets ("Métricas" then "Operações")
pub fn render_csv(workbook: &Workbook) -> String {
    let m = &workbook.metrics;
    let unit = m.unit.as_str();

    let mut metrics_sheet: Sheet = vec![
        vec![Cell::text("Métrica"), Cell::text("Valor"), Cell::text("Unidade")],
        vec![Cell::text("Tempo Total"), Cell::text(&m.total_time), Cell::text(unit)],
        vec![
            Cell::text("Número de Operações"),
            Cell::text(m.operation_count.to_string()),
            Cell::text("operações"),
        ],
        vec![Cell::text("Tempo Médio"), Cell::text(&m.average_time), Cell::text(unit)],
        vec![
            Cell::text("Operação Gargalo"),
            Cell::text(&m.bottleneck),
            Cell::text(format!("{} {}", m.bottleneck_time, unit)),
        ],
    ];
    if let Some(ref takt) = m.takt_time {
        metrics_sheet.push(vec![
            Cell::text("Takt Time"),
            Cell::text(takt),
            Cell::text(format!("{}/{}", unit, m.demand_unit)),
        ]);
    }
    metrics_sheet.push(vec![
        Cell::text("Data de Exportação"),
        Cell::text(&m.export_date),
        Cell::Empty,
    ]);

    let mut operations_sheet: Sheet = vec![vec![
        Cell::text("Operação"),
        Cell::text(time_header(m.unit)),
        Cell::text("Unidade Original"),
        Cell::text("Status"),
        Cell::text("% do Total"),
    ]];
    operations_sheet.extend(workbook.operations.iter().map(|row| {
        vec![
            Cell::text(&row.name),
            Cell::Number(row.time),
            Cell::text(&row.original),
            Cell::text(&row.status),
            Cell::text(&row.share_of_total),
        ]
    }));

    csv::write_sheets(&[metrics_sheet, operations_sheet])
}

/// Render the workbook as TOML (`[metrics]` plus `[[operations]]`)
pub fn render_toml(workbook: &Workbook) -> Result<String, ExchangeError> {
    Ok(toml::to_string_pretty(workbook)?)
}

/// Render the workbook as a plain text report
pub fn render_report(workbook: &Workbook) -> String {
    let m = &workbook.metrics;
    let unit = m.unit.as_str();

    let mut out = format!("{}\n\nData: {}\n\nMétricas:\n", workbook.title, m.export_date);
    out.push_str(&format!("  Tempo Total: {} {}\n", m.total_time, unit));
    out.push_str(&format!("  Número de Operações: {}\n", m.operation_count));
    out.push_str(&format!("  Tempo Médio: {} {}\n", m.average_time, unit));
    out.push_str(&format!(
        "  Operação Gargalo: {} ({} {})\n",
        m.bottleneck, m.bottleneck_time, unit
    ));
    if let Some(ref takt) = m.takt_time {
        out.push_str(&format!("  Takt Time: {} {}/{}\n", takt, unit, m.demand_unit));
    }

    let name_width = workbook
        .operations
        .iter()
        .map(|row| row.name.chars().count())
        .chain(std::iter::once("Operação".chars().count()))
        .max()
        .unwrap_or(0);
    let time_title = time_header(m.unit);

    out.push_str("\nOperações:\n");
    out.push_str(&format!(
        "  {:<width$}  {:>15}  {}\n",
        "Operação",
        time_title,
        "Status",
        width = name_width
    ));
    out.push_str(&format!("  {}\n", "-".repeat(name_width + 2 + 15 + 2 + 7)));
    for row in &workbook.operations {
        out.push_str(&format!(
            "  {:<width$}  {:>15}  {}\n",
            row.name,
            one_decimal(row.time),
            row.status,
            width = name_width
        ));
    }
    out
}

/// Render the workbook in the requested format
pub fn render(format: ExportFormat, workbook: &Workbook) -> Result<String, ExchangeError> {
    match format {
        ExportFormat::Csv => Ok(render_csv(workbook)),
        ExportFormat::Toml => render_toml(workbook),
        ExportFormat::Report => Ok(render_report(workbook)),
    }
}

/// Render and write the workbook to `path`
pub fn export_to_path(
    path: &Path,
    format: ExportFormat,
    workbook: &Workbook,
) -> Result<(), ExchangeError> {
    let content = render(format, workbook)?;
    fs::write(path, content).map_err(|source| ExchangeError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), %format, rows = workbook.operations.len(), "workbook exported");
    Ok(())
}
