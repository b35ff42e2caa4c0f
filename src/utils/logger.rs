use serde::{Deserialize, Serialize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    /// One JSON object per line, for log collectors.
    Json,
}

fn default_filter(verbose: bool) -> EnvFilter {
    // RUST_LOG 優先
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("pricing_etl=debug,info")
        } else {
            EnvFilter::new("pricing_etl=info")
        }
    })
}

pub fn init_cli_logger(verbose: bool) {
    init_logger(verbose, LogFormat::Compact);
}

pub fn init_logger(verbose: bool, format: LogFormat) {
    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(default_filter(verbose));
    match format {
        LogFormat::Compact => registry.with(layer.compact()).init(),
        LogFormat::Json => registry.with(layer.json()).init(),
    }
}
