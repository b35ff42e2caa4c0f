use crate::domain::model::{ColumnLayout, OutputFormat, RowErrorPolicy, SourceRow, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Path of the commerce export, relative to the storage root.
    fn source_path(&self) -> &str;
    fn sheet_name(&self) -> &str;
    /// 1-based row where data starts.
    fn data_start_row(&self) -> usize;
    fn column_layout(&self) -> ColumnLayout;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> Vec<OutputFormat>;
    /// File name, without extension, of every output.
    fn file_stem(&self) -> &str;
    fn row_error_policy(&self) -> RowErrorPolicy;
    fn require_sku(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<SourceRow>>;
    async fn transform(&self, rows: Vec<SourceRow>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<Vec<String>>;
}
