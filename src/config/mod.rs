pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::report::{DATA_STARTING_ROW, PRIMARY_SHEET_NAME};
#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::{ColumnLayout, OutputFormat, RowErrorPolicy};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::logger::LogFormat;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate, SUPPORTED_INPUT_EXTENSIONS};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "pricing-etl")]
#[command(about = "Flatten commerce export pricing into a US/CA price table")]
pub struct CliConfig {
    /// Commerce product export (xlsx, xlsm, xls or ods)
    #[arg(short, long)]
    pub input: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = PRIMARY_SHEET_NAME)]
    pub sheet: String,

    /// 1-based row where product data starts
    #[arg(long, default_value_t = DATA_STARTING_ROW)]
    pub start_row: usize,

    /// Zero-based column holding the SKU
    #[arg(long, default_value_t = 3)]
    pub sku_column: usize,

    /// Zero-based column holding the pricing JSON
    #[arg(long, default_value_t = 2)]
    pub payload_column: usize,

    #[arg(long, value_delimiter = ',', default_value = "xlsx")]
    pub formats: Vec<String>,

    /// Output file name without extension
    #[arg(long, default_value = "prices")]
    pub file_stem: String,

    #[arg(long, help = "Skip rows that fail validation instead of aborting")]
    pub skip_invalid_rows: bool,

    #[arg(long, help = "Accept rows whose SKU cell is blank")]
    pub allow_blank_sku: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn source_path(&self) -> &str {
        &self.input
    }

    fn sheet_name(&self) -> &str {
        &self.sheet
    }

    fn data_start_row(&self) -> usize {
        self.start_row
    }

    fn column_layout(&self) -> ColumnLayout {
        ColumnLayout {
            sku: self.sku_column,
            payload: self.payload_column,
        }
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> Vec<OutputFormat> {
        self.formats
            .iter()
            .filter_map(|format| OutputFormat::parse(format))
            .collect()
    }

    fn file_stem(&self) -> &str {
        &self.file_stem
    }

    fn row_error_policy(&self) -> RowErrorPolicy {
        if self.skip_invalid_rows {
            RowErrorPolicy::Skip
        } else {
            RowErrorPolicy::Abort
        }
    }

    fn require_sku(&self) -> bool {
        !self.allow_blank_sku
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_file_extensions("input", &[self.input.as_str()], &SUPPORTED_INPUT_EXTENSIONS)?;
        validation::validate_non_empty_string("sheet", &self.sheet)?;
        validation::validate_positive_number("start_row", self.start_row, 1)?;
        validation::validate_column_layout("sku_column/payload_column", &self.column_layout())?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_output_formats("formats", &self.formats)?;
        validation::validate_non_empty_string("file_stem", &self.file_stem)?;
        Ok(())
    }
}
