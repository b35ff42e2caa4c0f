use clap::Parser;
use pricing_etl::config::cli::absolute_input_path;
use pricing_etl::core::{ConfigProvider, Pipeline};
use pricing_etl::domain::model::RowErrorPolicy;
use pricing_etl::utils::error::ErrorSeverity;
use pricing_etl::utils::{logger, validation::Validate};
use pricing_etl::{EtlEngine, LocalStorage, PricingPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-report")]
#[command(about = "Pricing report ETL driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "pricing-report.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the row error policy from config
    #[arg(long)]
    skip_invalid_rows: Option<bool>,

    /// Validate every row and report problems without writing output
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based pricing report");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(skip) = args.skip_invalid_rows {
        config.error_handling.on_row_error = if skip {
            RowErrorPolicy::Skip
        } else {
            RowErrorPolicy::Abort
        };
        tracing::info!("🔧 Row error policy overridden to: {:?}", config.error_handling.on_row_error);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    config.source.path = absolute_input_path(&config.source.path)?;

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No output will be written");
        // 乾跑時列出所有問題列，而不是停在第一筆
        config.error_handling.on_row_error = RowErrorPolicy::Skip;
        let storage = LocalStorage::new(config.output_path().to_string());
        let pipeline = PricingPipeline::new(storage, config);
        return perform_dry_run(&pipeline).await;
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = PricingPipeline::new(storage, config);
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(summary) => {
            tracing::info!("✅ Pricing report completed successfully!");
            println!(
                "✅ Wrote {} items from {} rows ({} skipped)",
                summary.items_written, summary.rows_read, summary.rows_skipped
            );
            for output in &summary.outputs {
                println!("📁 Output saved to: {}", output);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Pricing report failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Report: {}", config.report.name);
    if let Some(description) = &config.report.description {
        println!("  Description: {}", description);
    }
    println!("  Source: {}", config.source_path());
    println!(
        "  Sheet: {} (data from row {})",
        config.sheet_name(),
        config.data_start_row()
    );
    let layout = config.column_layout();
    println!("  Columns: payload={} sku={}", layout.payload, layout.sku);
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.load.output_formats.join(", "));
    println!("  On row error: {:?}", config.row_error_policy());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run<P: Pipeline>(pipeline: &P) -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Dry Run Analysis:");
    println!();

    let rows = pipeline.extract().await?;
    let rows_read = rows.len();
    let result = pipeline.transform(rows).await?;

    println!("📊 Rows read: {}", rows_read);
    println!("  ✅ Valid items: {}", result.rows.len());
    println!("  💲 Fully priced in every region: {}", result.fully_priced);
    println!("  ⚠️ Invalid rows: {}", result.failures.len());

    for failure in &result.failures {
        println!(
            "    row {} [{}]: {}",
            failure.row_number,
            failure.sku.as_deref().unwrap_or("-"),
            failure.message
        );
    }

    println!();
    println!("✅ Dry run analysis complete. Nothing was written.");

    if !result.failures.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}
