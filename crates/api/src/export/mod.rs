//! Spreadsheet and PDF rendering of report tables.
//!
//! Handlers assemble [`Table`]s from repository rows; [`xlsx`] and [`pdf`]
//! turn them into in-memory documents.

pub mod pdf;
pub mod xlsx;

use faena_core::types::{Date, Timestamp};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// MIME type of `.xlsx` downloads.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// MIME type of `.pdf` downloads.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    /// Rendered with two decimals.
    Money(Decimal),
    Empty,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn date(value: Date) -> Self {
        Cell::Text(value.format("%Y-%m-%d").to_string())
    }

    pub fn timestamp(value: Timestamp) -> Self {
        Cell::Text(value.format("%Y-%m-%d %H:%M").to_string())
    }

    pub fn opt_timestamp(value: Option<Timestamp>) -> Self {
        value.map_or(Cell::Empty, Cell::timestamp)
    }

    /// Minutes shown as decimal hours.
    pub fn hours(minutes: i64) -> Self {
        Cell::Number((minutes as f64 / 60.0 * 100.0).round() / 100.0)
    }

    /// Plain-text rendering used by the PDF writer.
    pub fn display(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.fract() == 0.0 {
                    format!("{n:.0}")
                } else {
                    format!("{n:.2}")
                }
            }
            Cell::Money(d) => format!("{:.2}", d.round_dp(2)),
            Cell::Empty => String::new(),
        }
    }

    /// Numeric value for spreadsheet cells, if any.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            Cell::Money(d) => d.to_f64(),
            Cell::Text(_) | Cell::Empty => None,
        }
    }
}

/// A titled grid of cells. Every row has `headers.len()` cells.
#[derive(Debug, Clone)]
pub struct Table {
    /// Worksheet name; at most 31 characters, no `[]:*?/\`.
    pub sheet_name: &'static str,
    pub title: String,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(sheet_name: &'static str, title: impl Into<String>, headers: Vec<&'static str>) -> Self {
        Self {
            sheet_name,
            title: title.into(),
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.headers.len());
        self.rows.push(row);
    }
}

/// `Content-Disposition` value for a download named `file_name`.
pub fn attachment(file_name: &str) -> String {
    format!("attachment; filename=\"{file_name}\"")
}
