use clap::Parser;
use pricing_etl::config::cli::absolute_input_path;
use pricing_etl::utils::error::{ErrorSeverity, EtlError};
use pricing_etl::utils::{logger, validation::Validate};
use pricing_etl::{CliConfig, EtlEngine, LocalStorage, PricingPipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(config.verbose, config.log_format);

    tracing::info!("Starting pricing-etl CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 輸入路徑不應相對於輸出目錄解析
    config.input = absolute_input_path(&config.input)?;

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = PricingPipeline::new(storage, config);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(summary) => {
            println!(
                "✅ Wrote {} items from {} rows ({} skipped)",
                summary.items_written, summary.rows_read, summary.rows_skipped
            );
            for output in &summary.outputs {
                println!("📁 Output saved to: {}", output);
            }
        }
        Err(e) => {
            report_failure(&e);
            std::process::exit(exit_code(e.severity()));
        }
    }

    Ok(())
}

fn report_failure(e: &EtlError) {
    tracing::error!(
        "❌ Pricing ETL failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
}

fn exit_code(severity: ErrorSeverity) -> i32 {
    match severity {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
