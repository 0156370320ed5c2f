//! Domain entities for coverage reports.
//!
//! A report is the pie-chart-shaped JSON document produced by a test run: a
//! title, an analysis-bucket table (file counts per status) and a coverage
//! table (covered / not covered line counts). Tables are deliberately lenient:
//! a misshapen table never fails parsing, it only fails the shape predicates.

use std::fmt;
use std::fmt::Write as _;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Expected row count of the analysis-bucket table (header + 4 buckets).
pub const ANALYSIS_ROWS: usize = 5;
/// Expected row count of the coverage table (header + covered + not covered).
pub const COVERAGE_ROWS: usize = 3;
/// Expected column count of a well-formed table row.
pub const DATA_COLUMNS: usize = 2;

/// A single table cell, which may hold a label or a count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    /// A string label, e.g. `"Covered"`.
    Text(String),
    /// An integral count.
    Int(i64),
    /// A floating-point count.
    Float(f64),
    /// Any other JSON value; coerces to zero wherever a number is expected.
    Other(Value),
}

impl Cell {
    /// Numeric value of the cell; non-numeric cells coerce to zero.
    pub fn as_number(&self) -> f64 {
        match self {
            Self::Int(value) => *value as f64,
            Self::Float(value) => *value,
            Self::Text(_) | Self::Other(_) => 0.0,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{text}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Other(value) => write!(f, "{value}"),
        }
    }
}

/// One table row; `None` stands for a JSON `null` row, which is skipped
/// wherever rows are iterated.
pub type Row = Option<Vec<Cell>>;

/// An ordered table of rows.
pub type Table = Vec<Row>;

/// The coverage report for one build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageReport {
    /// Descriptive label; may be empty.
    #[serde(default)]
    pub title: String,
    /// Analysis buckets: header row plus Danger/Risk/Acceptable/Safe file
    /// counts.
    #[serde(default, deserialize_with = "lenient_table")]
    pub data: Table,
    /// Coverage breakdown: header row plus Covered and Not Covered line
    /// counts.
    #[serde(default, deserialize_with = "lenient_table")]
    pub coverage_data: Table,
}

impl CoverageReport {
    /// Parse a report from JSON text.
    ///
    /// Fails only when the text is not a valid JSON object. Missing or
    /// misshapen sub-tables parse as empty or partial tables and surface
    /// through [`CoverageReport::has_coverage_data`] and
    /// [`CoverageReport::has_analysis_data`] instead.
    pub fn from_json(text: &str) -> crate::error::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Whether the coverage table is well formed: exactly three rows with a
    /// two-column header.
    pub fn has_coverage_data(&self) -> bool {
        self.coverage_data.len() == COVERAGE_ROWS
            && first_row_columns(&self.coverage_data) == Some(DATA_COLUMNS)
    }

    /// Whether the analysis-bucket table is well formed: exactly five rows,
    /// with the coverage table carrying a two-column header.
    ///
    /// Note the column check inspects the coverage table, not the analysis
    /// table. Analysis buckets are never shown without a readable coverage
    /// breakdown next to them.
    pub fn has_analysis_data(&self) -> bool {
        self.data.len() == ANALYSIS_ROWS
            && first_row_columns(&self.coverage_data) == Some(DATA_COLUMNS)
    }

    /// Coverage percentage computed from the covered and not-covered line
    /// counts.
    ///
    /// Returns zero when the coverage table is misshapen or when the report
    /// covers no lines at all.
    pub fn percentage(&self) -> f64 {
        if !self.has_coverage_data() {
            return 0.0;
        }
        let covered = numeric_cell(&self.coverage_data, 1, 1);
        let not_covered = numeric_cell(&self.coverage_data, 2, 1);
        let total = covered + not_covered;
        if total == 0.0 {
            0.0
        } else {
            covered * 100.0 / total
        }
    }

    /// Coverage percentage rounded half-up at `scale` decimal places.
    pub fn rounded_percentage(&self, scale: u32) -> f64 {
        rounded_value(self.percentage(), scale)
    }

    /// Percentage of lines not covered, rounded to two decimal places.
    pub fn percentage_not_covered(&self) -> f64 {
        rounded_value(100.0 - self.rounded_percentage(2), 2)
    }

    /// Per-bucket file counts as display text, e.g.
    /// `"Danger (0% - 74%) = 11 files. "`.
    ///
    /// Header and null rows are skipped; counts are truncated to whole files.
    pub fn file_coverage_status(&self) -> String {
        let mut result = String::new();
        for row in self.data.iter().skip(1).flatten() {
            let label = row.first().map(Cell::to_string).unwrap_or_default();
            let files = row.get(1).map(Cell::as_number).unwrap_or(0.0) as i64;
            let _ = write!(result, "{label} = {files} files. ");
        }
        result
    }
}

/// Round half-up (half away from zero) at `scale` decimal places.
pub fn rounded_value(value: f64, scale: u32) -> f64 {
    let factor = 10f64.powi(scale as i32);
    (value * factor).round() / factor
}

/// Render a table for the pie-chart widget: string cells become quote-wrapped
/// strings, numeric cells stay bare numbers, anything else is dropped.
pub fn chart_rows(table: &Table) -> Vec<Vec<Value>> {
    table
        .iter()
        .flatten()
        .map(|row| {
            row.iter()
                .filter_map(|cell| match cell {
                    Cell::Text(text) => Some(Value::String(format!("\"{text}\""))),
                    Cell::Int(value) => Some(Value::from(*value)),
                    Cell::Float(value) => Some(Value::from(*value)),
                    Cell::Other(_) => None,
                })
                .collect()
        })
        .collect()
}

fn first_row_columns(table: &Table) -> Option<usize> {
    table.first().and_then(|row| row.as_ref()).map(Vec::len)
}

fn numeric_cell(table: &Table, row: usize, column: usize) -> f64 {
    table
        .get(row)
        .and_then(|row| row.as_ref())
        .and_then(|row| row.get(column))
        .map(Cell::as_number)
        .unwrap_or(0.0)
}

fn lenient_table<'de, D>(deserializer: D) -> Result<Table, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(table_from_value(value))
}

fn table_from_value(value: Value) -> Table {
    let Value::Array(rows) = value else {
        return Vec::new();
    };
    rows.into_iter().map(row_from_value).collect()
}

fn row_from_value(value: Value) -> Row {
    match value {
        Value::Array(cells) => Some(cells.into_iter().map(cell_from_value).collect()),
        _ => None,
    }
}

fn cell_from_value(value: Value) -> Cell {
    match value {
        Value::String(text) => Cell::Text(text),
        Value::Number(number) => match (number.as_i64(), number.as_f64()) {
            (Some(int), _) => Cell::Int(int),
            (None, Some(float)) => Cell::Float(float),
            (None, None) => Cell::Other(Value::Number(number)),
        },
        other => Cell::Other(other),
    }
}
