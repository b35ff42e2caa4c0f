use anyhow::Result;
use calamine::{open_workbook_auto, Data, Reader};
use pricing_etl::domain::model::RowErrorPolicy;
use pricing_etl::{EtlEngine, EtlError, LocalStorage, PricingPipeline, TomlConfig};
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tempfile::TempDir;

const HEADER_ROWS: [[&str; 4]; 3] = [
    ["$catalogVersion", "name[en]", "amerPricing", "code[unique=true]"],
    ["Default:Online", "", "", ""],
    ["", "", "", ""],
];

/// Writes a commerce export with the given `(payload, sku)` data rows.
fn write_export(path: &Path, sheet: &str, rows: &[(&str, &str)]) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet)?;

    for (row, cells) in HEADER_ROWS.iter().enumerate() {
        for (col, value) in cells.iter().enumerate() {
            if !value.is_empty() {
                worksheet.write_string(row as u32, col as u16, *value)?;
            }
        }
    }

    for (index, (payload, sku)) in rows.iter().enumerate() {
        let row = (index + 3) as u32;
        worksheet.write_string(row, 0, "Online")?;
        worksheet.write_string(row, 1, format!("Product {}", index + 1))?;
        worksheet.write_string(row, 2, *payload)?;
        // 數字型 SKU 以數值儲存，模擬實際匯出
        match sku.parse::<f64>() {
            Ok(number) => worksheet.write_number(row, 3, number)?,
            Err(_) => worksheet.write_string(row, 3, *sku)?,
        };
    }

    workbook.save(path)?;
    Ok(())
}

fn config_for(input: &Path, output: &Path, formats: &str, policy: &str) -> Result<TomlConfig> {
    let toml_content = format!(
        r#"
[report]
name = "integration"

[source]
path = "{}"

[load]
output_path = "{}"
output_formats = [{}]

[error_handling]
on_row_error = "{}"
"#,
        input.to_string_lossy().replace('\\', "/"),
        output.to_string_lossy().replace('\\', "/"),
        formats,
        policy
    );
    Ok(TomlConfig::from_toml_str(&toml_content)?)
}

#[tokio::test]
async fn test_end_to_end_xlsx_report() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("export.xlsx");
    let output = temp_dir.path().join("out");

    write_export(
        &input,
        "CommerceProduct",
        &[
            (
                r#"{"us":{"price":"129.99","salePrice":"99.50"},"ca":{"price":"","salePrice":""}}"#,
                "1234",
            ),
            (
                r#"{"us":{"price":"20.00","salePrice":"15.00"},"ca":{"price":"25.00","salePrice":"19.99"}}"#,
                "SKU-B",
            ),
        ],
    )?;

    let config = config_for(&input, &output, r#""xlsx", "csv""#, "abort")?;
    let storage = LocalStorage::new(output.to_string_lossy().into_owned());
    let engine = EtlEngine::new(PricingPipeline::new(storage, config));

    let summary = engine.run().await?;
    assert_eq!(summary.rows_read, 2);
    assert_eq!(summary.items_written, 2);
    assert_eq!(summary.rows_skipped, 0);
    assert_eq!(summary.outputs.len(), 2);
    assert!(summary.outputs[0].ends_with("prices.xlsx"));

    let mut workbook = open_workbook_auto(output.join("prices.xlsx"))?;
    let range = workbook.worksheet_range("Prices")?;
    let rows: Vec<Vec<Data>> = range.rows().map(|r| r.to_vec()).collect();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0][0], Data::String("SKU".to_string()));
    assert_eq!(rows[0][4], Data::String("CA Sale Price".to_string()));
    assert_eq!(
        rows[1],
        vec![
            Data::String("1234".to_string()),
            Data::Float(129.99),
            Data::Float(99.5),
            Data::Float(0.0),
            Data::Float(0.0),
        ]
    );
    assert_eq!(rows[2][0], Data::String("SKU-B".to_string()));
    assert_eq!(rows[2][4], Data::Float(19.99));

    let csv = std::fs::read_to_string(output.join("prices.csv"))?;
    assert!(csv.starts_with("SKU,US Price,US Sale Price,CA Price,CA Sale Price"));
    assert!(csv.contains("1234,129.99,99.50,0.00,0.00"));
    assert!(csv.contains("SKU-B,20.00,15.00,25.00,19.99"));

    Ok(())
}

#[tokio::test]
async fn test_missing_region_aborts_run() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("export.xlsx");
    let output = temp_dir.path().join("out");

    write_export(
        &input,
        "CommerceProduct",
        &[
            (
                r#"{"us":{"price":"1.00","salePrice":"1.00"},"ca":{"price":"1.00","salePrice":"1.00"}}"#,
                "1",
            ),
            (r#"{"us":{"price":"10.00","salePrice":"5.00"}}"#, "2"),
        ],
    )?;

    let config = config_for(&input, &output, r#""csv""#, "abort")?;
    let storage = LocalStorage::new(output.to_string_lossy().into_owned());
    let engine = EtlEngine::new(PricingPipeline::new(storage, config));

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, EtlError::RowError { row: 5, .. }));
    assert!(matches!(err.root(), EtlError::RegionNotFoundInPayload { .. }));
    // 中止時不應產生輸出檔
    assert!(!output.join("prices.csv").exists());

    Ok(())
}

#[tokio::test]
async fn test_skip_policy_writes_valid_rows() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("export.xlsx");
    let output = temp_dir.path().join("out");

    write_export(
        &input,
        "CommerceProduct",
        &[
            ("{not json", "1"),
            (
                r#"{"us":{"price":"10.00","salePrice":"5.00"},"ca":{"price":"12.00","salePrice":""}}"#,
                "2",
            ),
        ],
    )?;

    let mut config = config_for(&input, &output, r#""json""#, "skip")?;
    assert_eq!(config.error_handling.on_row_error, RowErrorPolicy::Skip);
    config.load.file_stem = "amer".to_string();

    let storage = LocalStorage::new(output.to_string_lossy().into_owned());
    let engine = EtlEngine::new(PricingPipeline::new(storage, config));

    let summary = engine.run().await?;
    assert_eq!(summary.rows_read, 2);
    assert_eq!(summary.items_written, 1);
    assert_eq!(summary.rows_skipped, 1);

    let json: serde_json::Value = serde_json::from_slice(&std::fs::read(output.join("amer.json"))?)?;
    assert_eq!(json.as_array().map(Vec::len), Some(1));
    assert_eq!(json[0]["SKU"], "2");
    assert_eq!(json[0]["US Price"], 10);
    assert_eq!(json[0]["US Sale Price"], 5);
    assert_eq!(json[0]["CA Price"], 12);
    assert_eq!(json[0]["CA Sale Price"], 0);

    Ok(())
}

#[tokio::test]
async fn test_wrong_sheet_is_invalid_report() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = temp_dir.path().join("export.xlsx");
    let output = temp_dir.path().join("out");

    write_export(&input, "Sheet1", &[])?;

    let config = config_for(&input, &output, r#""xlsx""#, "abort")?;
    let storage = LocalStorage::new(output.to_string_lossy().into_owned());
    let engine = EtlEngine::new(PricingPipeline::new(storage, config));

    let err = engine.run().await.unwrap_err();
    assert!(matches!(err, EtlError::InvalidReportFormat { .. }));

    Ok(())
}
