//! Serializers for the flat pricing table.

use crate::domain::model::OutputFormat;
use crate::domain::money::decimal_to_f64;
use crate::domain::projection::{OutputValue, PriceRow, OUTPUT_HEADER};
use crate::utils::error::{EtlError, Result};
use rust_xlsxwriter::{Format, Workbook};

pub const OUTPUT_SHEET_NAME: &str = "Prices";

pub fn render(format: OutputFormat, rows: &[PriceRow]) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Xlsx => write_xlsx(rows),
        OutputFormat::Csv => write_csv(rows),
        OutputFormat::Json => write_json(rows),
    }
}

/// Header row plus one row per item; amounts are numeric cells.
pub fn write_xlsx(rows: &[PriceRow]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let amount_format = Format::new().set_num_format("0.00");

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(OUTPUT_SHEET_NAME)?;

    for (col, header) in OUTPUT_HEADER.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (index, row) in rows.iter().enumerate() {
        let row_num = (index + 1) as u32;
        for (col, value) in row.values().into_iter().enumerate() {
            let col = col as u16;
            match value {
                OutputValue::Text(text) => {
                    worksheet.write_string(row_num, col, text)?;
                }
                OutputValue::Number(number) => {
                    worksheet.write_number_with_format(row_num, col, decimal_to_f64(number), &amount_format)?;
                }
            }
        }
    }

    worksheet.autofit();
    Ok(workbook.save_to_buffer()?)
}

/// Amounts are written with exactly two decimals.
pub fn write_csv(rows: &[PriceRow]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(OUTPUT_HEADER)?;

    for row in rows {
        let record: Vec<String> = std::iter::once(row.sku.clone())
            .chain(row.amounts.iter().map(|amount| format!("{:.2}", amount)))
            .collect();
        writer.write_record(&record)?;
    }

    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(std::io::Error::other(e.to_string())))
}

/// An array of objects keyed by the header labels.
pub fn write_json(rows: &[PriceRow]) -> Result<Vec<u8>> {
    let items: Vec<serde_json::Map<String, serde_json::Value>> = rows
        .iter()
        .map(|row| {
            OUTPUT_HEADER
                .iter()
                .zip(row.values())
                .map(|(header, value)| (header.to_string(), value.to_json()))
                .collect()
        })
        .collect();

    Ok(serde_json::to_vec_pretty(&items)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{open_workbook_auto_from_rs, Data, Reader};
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    fn rows() -> Vec<PriceRow> {
        vec![
            PriceRow {
                sku: "1234".to_string(),
                amounts: vec![dec!(129.99), dec!(99.50), dec!(0), dec!(0)],
            },
            PriceRow {
                sku: "A-2".to_string(),
                amounts: vec![dec!(10), dec!(8.5), dec!(12), dec!(11.25)],
            },
        ]
    }

    #[test]
    fn test_csv_output() {
        let csv = String::from_utf8(write_csv(&rows()).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "SKU,US Price,US Sale Price,CA Price,CA Sale Price");
        assert_eq!(lines[1], "1234,129.99,99.50,0.00,0.00");
        assert_eq!(lines[2], "A-2,10.00,8.50,12.00,11.25");
    }

    #[test]
    fn test_json_output() {
        let json: serde_json::Value = serde_json::from_slice(&write_json(&rows()).unwrap()).unwrap();
        assert_eq!(json[0]["SKU"], "1234");
        assert_eq!(json[0]["US Price"], 129.99);
        assert_eq!(json[0]["US Sale Price"], 99.5);
        assert_eq!(json[0]["CA Price"], 0);
        assert_eq!(json[1]["CA Sale Price"], 11.25);
    }

    #[test]
    fn test_xlsx_output_is_numeric() {
        let bytes = write_xlsx(&rows()).unwrap();
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).unwrap();
        let range = workbook.worksheet_range(OUTPUT_SHEET_NAME).unwrap();

        assert_eq!(range.get_value((0, 0)), Some(&Data::String("SKU".to_string())));
        assert_eq!(range.get_value((0, 4)), Some(&Data::String("CA Sale Price".to_string())));
        assert_eq!(range.get_value((1, 0)), Some(&Data::String("1234".to_string())));
        assert_eq!(range.get_value((1, 1)), Some(&Data::Float(129.99)));
        assert_eq!(range.get_value((1, 2)), Some(&Data::Float(99.5)));
        assert_eq!(range.get_value((1, 3)), Some(&Data::Float(0.0)));
        assert_eq!(range.height(), 3);
    }

    #[test]
    fn test_empty_table_still_has_header() {
        let csv = String::from_utf8(render(OutputFormat::Csv, &[]).unwrap()).unwrap();
        assert_eq!(csv.trim_end(), OUTPUT_HEADER.join(","));
    }
}
