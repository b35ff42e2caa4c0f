//! Reading the commerce platform's product export.

use crate::domain::model::{CellValue, SourceRow};
use crate::utils::error::{EtlError, Result};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::io::Cursor;

/// Sheet holding the product rows in a commerce export.
pub const PRIMARY_SHEET_NAME: &str = "CommerceProduct";

/// Three header/metadata rows precede the data.
pub const DATA_STARTING_ROW: usize = 4;

/// One sheet of an opened export.
pub struct CommerceReport {
    sheet_name: String,
    range: Range<Data>,
}

impl CommerceReport {
    /// Opens a workbook (xlsx, xlsm, xls, ods) from memory and selects
    /// `sheet_name`.
    pub fn from_bytes(bytes: Vec<u8>, sheet_name: &str) -> Result<Self> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;

        let sheet_names = workbook.sheet_names();
        if !sheet_names.iter().any(|name| name == sheet_name) {
            return Err(EtlError::InvalidReportFormat {
                message: format!(
                    "sheet '{}' not found (available: {})",
                    sheet_name,
                    sheet_names.join(", ")
                ),
            });
        }

        let range = workbook.worksheet_range(sheet_name)?;
        tracing::debug!(
            "Opened sheet '{}' with {}x{} used cells",
            sheet_name,
            range.height(),
            range.width()
        );

        Ok(Self {
            sheet_name: sheet_name.to_string(),
            range,
        })
    }

    pub fn sheet_name(&self) -> &str {
        &self.sheet_name
    }

    /// Rows from the 1-based `data_start_row` on. Completely blank rows are
    /// dropped; cells are indexed by absolute sheet column.
    pub fn data_rows(&self, data_start_row: usize) -> Vec<SourceRow> {
        // 使用範圍不一定從 A1 開始
        let (start_row, start_col) = match self.range.start() {
            Some((row, col)) => (row as usize, col as usize),
            None => return Vec::new(),
        };
        let first_data_index = data_start_row.saturating_sub(1);

        let mut rows = Vec::new();
        for (offset, cells) in self.range.rows().enumerate() {
            let row_index = start_row + offset;
            if row_index < first_data_index {
                continue;
            }

            let values: Vec<CellValue> = std::iter::repeat(CellValue::Empty)
                .take(start_col)
                .chain(cells.iter().map(cell_value))
                .collect();

            let row = SourceRow::new(row_index + 1, values);
            if row.is_blank() {
                tracing::debug!("Skipping blank row {}", row.row_number);
                continue;
            }
            rows.push(row);
        }
        rows
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(n) => CellValue::Int(*n),
        Data::Float(n) => CellValue::Float(*n),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::Text(other.to_string()),
    }
}
