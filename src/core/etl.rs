use crate::core::Pipeline;
use crate::domain::model::RunSummary;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("Starting pricing ETL process...");

        // Extract
        tracing::info!("Extracting rows...");
        let rows = self.pipeline.extract().await?;
        let rows_read = rows.len();
        tracing::info!("Extracted {} rows", rows_read);

        // Transform
        tracing::info!("Transforming rows...");
        let result = self.pipeline.transform(rows).await?;
        let items_written = result.rows.len();
        let rows_skipped = result.failures.len();
        tracing::info!(
            "Transformed {} items ({} fully priced, {} skipped)",
            items_written,
            result.fully_priced,
            rows_skipped
        );

        // Load
        tracing::info!("Loading output...");
        let outputs = self.pipeline.load(result).await?;
        for output in &outputs {
            tracing::info!("Output saved to: {}", output);
        }

        Ok(RunSummary {
            rows_read,
            items_written,
            rows_skipped,
            outputs,
        })
    }
}
