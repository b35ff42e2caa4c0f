use crate::domain::projection::PriceRow;
use serde::{Deserialize, Serialize};

/// A single cell as read from the source sheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Text form of the cell. Integer-like floats render without a
    /// fractional part so that numeric SKUs stay `1234`, not `1234.0`.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Int(n) => n.to_string(),
            CellValue::Float(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        }
    }
}

static EMPTY_CELL: CellValue = CellValue::Empty;

/// A data row of the source sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRow {
    /// 1-based row number in the sheet, for diagnostics.
    pub row_number: usize,
    pub cells: Vec<CellValue>,
}

impl SourceRow {
    pub fn new(row_number: usize, cells: Vec<CellValue>) -> Self {
        Self { row_number, cells }
    }

    /// Cell at a zero-based column; missing trailing cells read as empty.
    pub fn cell(&self, column: usize) -> &CellValue {
        self.cells.get(column).unwrap_or(&EMPTY_CELL)
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|cell| match cell {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        })
    }
}

/// Zero-based positions of the columns the mapper reads. Catalog version and
/// product name columns are carried by the export but never read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLayout {
    #[serde(default = "ColumnLayout::default_payload")]
    pub payload: usize,
    #[serde(default = "ColumnLayout::default_sku")]
    pub sku: usize,
}

impl ColumnLayout {
    fn default_payload() -> usize {
        2
    }

    fn default_sku() -> usize {
        3
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            payload: Self::default_payload(),
            sku: Self::default_sku(),
        }
    }
}

/// What to do when a single row fails validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowErrorPolicy {
    /// Stop the run on the first bad row.
    #[default]
    Abort,
    /// Log the row, record it, and keep going.
    Skip,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Xlsx,
    Csv,
    Json,
}

impl OutputFormat {
    pub const SUPPORTED: [&'static str; 3] = ["xlsx", "csv", "json"];

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "xlsx" => Some(OutputFormat::Xlsx),
            "csv" => Some(OutputFormat::Csv),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

/// A row that was skipped under [`RowErrorPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowFailure {
    pub row_number: usize,
    pub sku: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    pub rows: Vec<PriceRow>,
    pub failures: Vec<RowFailure>,
    /// Items with a regular and sale price in every region.
    pub fully_priced: usize,
}

/// Outcome of a whole run, reported by the engine.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub rows_read: usize,
    pub items_written: usize,
    pub rows_skipped: usize,
    pub outputs: Vec<String>,
}
