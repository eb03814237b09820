//! Rendering of report tables.
//!
//! Supports a bordered text grid and pretty-printed JSON.

use anyhow::Result;
use clap::ValueEnum;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Cell as GridCell, CellAlignment, Table};
use std::io::Write;
use tracing::debug;

use crate::reports::{Cell, ReportTable};

/// Printed instead of a grid when a report has no rows.
pub const NO_DATA_MESSAGE: &str = "Нет данных для отображения";

/// Printed when the input files contain no records at all.
pub const NO_RECORDS_MESSAGE: &str = "Нет данных для анализа";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Bordered text grid
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Renders `report` as a grid with the headers on top.
///
/// Text is centered and numbers are right-aligned. A table without rows
/// renders as [`NO_DATA_MESSAGE`].
pub fn render_table(report: &ReportTable) -> String {
    if report.is_empty() {
        return NO_DATA_MESSAGE.to_string();
    }

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let header: Vec<GridCell> = report
        .headers
        .iter()
        .map(|h| GridCell::new(h).set_alignment(CellAlignment::Center))
        .collect();
    table.set_header(header);

    for row in &report.rows {
        let cells: Vec<GridCell> = row.iter().map(grid_cell).collect();
        table.add_row(cells);
    }

    table.to_string()
}

fn grid_cell(cell: &Cell) -> GridCell {
    let alignment = if cell.is_numeric() {
        CellAlignment::Right
    } else {
        CellAlignment::Center
    };
    GridCell::new(cell).set_alignment(alignment)
}

/// Renders `report` as pretty-printed JSON.
pub fn render_json(report: &ReportTable) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes `report` to `out` in the requested format.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &ReportTable,
    format: OutputFormat,
) -> Result<()> {
    debug!(?format, rows = report.rows.len(), "Writing report");

    let rendered = match format {
        OutputFormat::Table => render_table(report),
        OutputFormat::Json => render_json(report)?,
    };
    writeln!(out, "{rendered}")?;
    out.flush()?;

    Ok(())
}
