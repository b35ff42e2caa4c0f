use crate::core::mapper::RowMapper;
use crate::core::report::CommerceReport;
use crate::core::writer;
use crate::core::{ConfigProvider, Pipeline, SourceRow, Storage, TransformResult};
use crate::domain::model::{RowErrorPolicy, RowFailure};
use crate::domain::projection::PriceRow;
use crate::utils::error::Result;

/// Commerce export → validated item prices → flat pricing table.
pub struct PricingPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    mapper: RowMapper,
}

impl<S: Storage, C: ConfigProvider> PricingPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let mapper = RowMapper::new(config.column_layout()).with_require_sku(config.require_sku());
        Self {
            storage,
            config,
            mapper,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for PricingPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<SourceRow>> {
        tracing::debug!("Reading report: {}", self.config.source_path());
        let bytes = self.storage.read_file(self.config.source_path()).await?;

        let report = CommerceReport::from_bytes(bytes, self.config.sheet_name())?;
        let rows = report.data_rows(self.config.data_start_row());

        tracing::debug!(
            "Sheet '{}' yielded {} data rows from row {}",
            report.sheet_name(),
            rows.len(),
            self.config.data_start_row()
        );
        Ok(rows)
    }

    async fn transform(&self, rows: Vec<SourceRow>) -> Result<TransformResult> {
        let policy = self.config.row_error_policy();
        let mut result = TransformResult::default();

        for row in &rows {
            match self.mapper.map_row(row) {
                Ok(record) => {
                    if record.fully_priced() {
                        result.fully_priced += 1;
                    }
                    result.rows.push(PriceRow::from_record(&record));
                }
                Err(e) if policy == RowErrorPolicy::Skip => {
                    tracing::warn!("⚠️ Skipping row {}: {}", row.row_number, e);
                    let sku = self.mapper.sku(row);
                    result.failures.push(RowFailure {
                        row_number: row.row_number,
                        sku: (!sku.is_empty()).then_some(sku),
                        message: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(result)
    }

    async fn load(&self, result: TransformResult) -> Result<Vec<String>> {
        let mut outputs = Vec::new();

        for format in self.config.output_formats() {
            let file_name = format!("{}.{}", self.config.file_stem(), format.extension());
            let data = writer::render(format, &result.rows)?;

            tracing::debug!("Writing {} ({} bytes) to storage", file_name, data.len());
            self.storage.write_file(&file_name, &data).await?;

            outputs.push(format!("{}/{}", self.config.output_path(), file_name));
        }

        Ok(outputs)
    }
}
