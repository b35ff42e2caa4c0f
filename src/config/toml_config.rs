use crate::core::report::{DATA_STARTING_ROW, PRIMARY_SHEET_NAME};
use crate::core::ConfigProvider;
use crate::domain::model::{ColumnLayout, OutputFormat, RowErrorPolicy};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate, SUPPORTED_INPUT_EXTENSIONS};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub report: ReportConfig,
    pub source: SourceConfig,
    #[serde(default)]
    pub columns: ColumnLayout,
    pub load: LoadConfig,
    #[serde(default)]
    pub error_handling: ErrorHandlingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: String,
    #[serde(default = "SourceConfig::default_sheet_name")]
    pub sheet_name: String,
    #[serde(default = "SourceConfig::default_data_start_row")]
    pub data_start_row: usize,
}

impl SourceConfig {
    fn default_sheet_name() -> String {
        PRIMARY_SHEET_NAME.to_string()
    }

    fn default_data_start_row() -> usize {
        DATA_STARTING_ROW
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    #[serde(default = "LoadConfig::default_output_formats")]
    pub output_formats: Vec<String>,
    #[serde(default = "LoadConfig::default_file_stem")]
    pub file_stem: String,
}

impl LoadConfig {
    fn default_output_formats() -> Vec<String> {
        vec!["xlsx".to_string()]
    }

    fn default_file_stem() -> String {
        "prices".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    #[serde(default)]
    pub on_row_error: RowErrorPolicy,
    #[serde(default = "ErrorHandlingConfig::default_require_sku")]
    pub require_sku: bool,
}

impl ErrorHandlingConfig {
    fn default_require_sku() -> bool {
        true
    }
}

impl Default for ErrorHandlingConfig {
    fn default() -> Self {
        Self {
            on_row_error: RowErrorPolicy::default(),
            require_sku: Self::default_require_sku(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${EXPORT_DIR})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("source.path", &self.source.path)?;
        validation::validate_file_extensions(
            "source.path",
            &[self.source.path.as_str()],
            &SUPPORTED_INPUT_EXTENSIONS,
        )?;
        validation::validate_non_empty_string("source.sheet_name", &self.source.sheet_name)?;
        validation::validate_positive_number("source.data_start_row", self.source.data_start_row, 1)?;

        validation::validate_column_layout("columns", &self.columns)?;

        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_output_formats("load.output_formats", &self.load.output_formats)?;
        validation::validate_non_empty_string("load.file_stem", &self.load.file_stem)?;

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn source_path(&self) -> &str {
        &self.source.path
    }

    fn sheet_name(&self) -> &str {
        &self.source.sheet_name
    }

    fn data_start_row(&self) -> usize {
        self.source.data_start_row
    }

    fn column_layout(&self) -> ColumnLayout {
        self.columns
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_formats(&self) -> Vec<OutputFormat> {
        self.load
            .output_formats
            .iter()
            .filter_map(|format| OutputFormat::parse(format))
            .collect()
    }

    fn file_stem(&self) -> &str {
        &self.load.file_stem
    }

    fn row_error_policy(&self) -> RowErrorPolicy {
        self.error_handling.on_row_error
    }

    fn require_sku(&self) -> bool {
        self.error_handling.require_sku
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
