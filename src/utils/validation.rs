use crate::domain::model::{ColumnLayout, OutputFormat};
use crate::utils::error::{EtlError, Result};
use std::collections::HashSet;

/// Spreadsheet formats the report reader can open.
pub const SUPPORTED_INPUT_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_file_extensions(field_name: &str, files: &[&str], allowed_extensions: &[&str]) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        let extension = std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension {
            Some(extension) if allowed_set.contains(extension.as_str()) => {}
            Some(extension) => {
                return Err(EtlError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.to_string(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
            None => {
                return Err(EtlError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.to_string(),
                    reason: "File has no extension or invalid filename".to_string(),
                });
            }
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// SKU and payload must be read from different columns.
pub fn validate_column_layout(field_name: &str, layout: &ColumnLayout) -> Result<()> {
    if layout.sku == layout.payload {
        return Err(EtlError::ConfigValidationError {
            field: field_name.to_string(),
            message: format!(
                "SKU and pricing payload cannot share column {}",
                layout.sku
            ),
        });
    }
    Ok(())
}

pub fn validate_output_formats(field_name: &str, formats: &[String]) -> Result<Vec<OutputFormat>> {
    if formats.is_empty() {
        return Err(EtlError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    formats
        .iter()
        .map(|format| {
            OutputFormat::parse(format).ok_or_else(|| EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    OutputFormat::SUPPORTED.join(", ")
                ),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("source.path", "export.xlsx").is_ok());
        assert!(validate_path("source.path", "").is_err());
        assert!(validate_path("source.path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("source.data_start_row", 4, 1).is_ok());
        assert!(validate_positive_number("source.data_start_row", 0, 1).is_err());
    }

    #[test]
    fn test_validate_file_extensions() {
        assert!(validate_file_extensions("source.path", &["export.XLSX"], &SUPPORTED_INPUT_EXTENSIONS).is_ok());
        assert!(validate_file_extensions("source.path", &["export.ods"], &SUPPORTED_INPUT_EXTENSIONS).is_ok());
        assert!(validate_file_extensions("source.path", &["export.csv"], &SUPPORTED_INPUT_EXTENSIONS).is_err());
        assert!(validate_file_extensions("source.path", &["export"], &SUPPORTED_INPUT_EXTENSIONS).is_err());
    }

    #[test]
    fn test_validate_column_layout() {
        assert!(validate_column_layout("columns", &ColumnLayout::default()).is_ok());
        let clash = ColumnLayout {
            payload: 3,
            ..ColumnLayout::default()
        };
        assert!(validate_column_layout("columns", &clash).is_err());
    }

    #[test]
    fn test_validate_output_formats() {
        let formats = vec!["xlsx".to_string(), "CSV".to_string()];
        assert_eq!(
            validate_output_formats("load.output_formats", &formats).unwrap(),
            vec![OutputFormat::Xlsx, OutputFormat::Csv]
        );
        assert!(validate_output_formats("load.output_formats", &["tsv".to_string()]).is_err());
        assert!(matches!(
            validate_output_formats("load.output_formats", &[]),
            Err(EtlError::MissingConfigError { .. })
        ));
    }
}
