use crate::domain::region::Region;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Malformed amount '{value}': {reason}")]
    MalformedAmount { value: String, reason: String },

    #[error("Malformed pricing payload for SKU '{sku}': {source}")]
    MalformedPricingPayload {
        sku: String,
        payload: String,
        source: serde_json::Error,
    },

    #[error("Region {region} not found in pricing payload for SKU '{sku}'")]
    RegionNotFoundInPayload { sku: String, region: Region },

    #[error("Incorrect pricing sent for {expected}: {region} price is bound to SKU '{found}'")]
    WrongRegionSku {
        expected: String,
        found: String,
        region: Region,
    },

    #[error("Price filed under {key} for SKU '{sku}' is tagged {found}")]
    RegionMismatch {
        sku: String,
        key: Region,
        found: Region,
    },

    #[error("Missing {region} price for SKU '{sku}' ({present} of {expected} regions present)")]
    MissingRegion {
        sku: String,
        region: Region,
        present: usize,
        expected: usize,
    },

    #[error("SKU cell is blank")]
    MissingSku,

    #[error("Invalid report format: {message}")]
    InvalidReportFormat { message: String },

    #[error("Row {row}: {source}")]
    RowError {
        row: usize,
        #[source]
        source: Box<EtlError>,
    },

    #[error("Spreadsheet read error: {0}")]
    SpreadsheetError(#[from] calamine::Error),

    #[error("Spreadsheet write error: {0}")]
    XlsxWriteError(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 來源資料內容有誤（價格、JSON、SKU）
    Data,
    /// 報表檔案結構不符
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EtlError {
    /// Wraps a row-level failure with the 1-based sheet row it came from.
    pub fn at_row(self, row: usize) -> Self {
        match self {
            // 已經帶有列號就不再包一層
            EtlError::RowError { .. } => self,
            other => EtlError::RowError {
                row,
                source: Box::new(other),
            },
        }
    }

    /// The underlying error with any row context stripped.
    pub fn root(&self) -> &EtlError {
        match self {
            EtlError::RowError { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.root() {
            EtlError::MalformedAmount { .. }
            | EtlError::MalformedPricingPayload { .. }
            | EtlError::RegionNotFoundInPayload { .. }
            | EtlError::WrongRegionSku { .. }
            | EtlError::RegionMismatch { .. }
            | EtlError::MissingRegion { .. }
            | EtlError::MissingSku => ErrorCategory::Data,
            EtlError::InvalidReportFormat { .. } | EtlError::SpreadsheetError(_) => {
                ErrorCategory::Input
            }
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => ErrorCategory::Configuration,
            _ => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.root() {
            EtlError::MalformedAmount { .. } => {
                "Fix the price value in the source report; prices must be numbers with at most 2 decimals"
            }
            EtlError::MalformedPricingPayload { .. } => {
                "Check the pricing JSON cell of the reported row; the raw text is in the log"
            }
            EtlError::RegionNotFoundInPayload { .. } | EtlError::MissingRegion { .. } => {
                "Make sure every product carries both a 'us' and a 'ca' pricing entry"
            }
            EtlError::WrongRegionSku { .. } | EtlError::RegionMismatch { .. } => {
                "Regional prices were bound to another product; re-export the report"
            }
            EtlError::MissingSku => {
                "Fill in the SKU column or run with blank SKUs allowed"
            }
            EtlError::InvalidReportFormat { .. } | EtlError::SpreadsheetError(_) => {
                "Make sure the input is an unmodified commerce product export"
            }
            EtlError::ConfigError { .. }
            | EtlError::ConfigValidationError { .. }
            | EtlError::InvalidConfigValueError { .. }
            | EtlError::MissingConfigError { .. } => "Review the command line flags or TOML configuration",
            EtlError::IoError(_) => "Check that the paths exist and are writable",
            _ => "Re-run with --verbose and inspect the log",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EtlError::RowError { row, source } => {
                format!("Row {} could not be processed: {}", row, source.user_friendly_message())
            }
            EtlError::MalformedPricingPayload { sku, .. } => {
                format!("The pricing data for SKU '{}' is not valid JSON", sku)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
