pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use core::{etl::EtlEngine, mapper::RowMapper, pipeline::PricingPipeline};
pub use domain::item_price::ItemPriceRecord;
pub use domain::money::MonetaryAmount;
pub use domain::pricing::{decode_regional_prices, RegionalPrice, RegionalPriceInfo};
pub use domain::projection::{OutputValue, PriceRow, OUTPUT_HEADER};
pub use domain::region::Region;
pub use utils::error::{EtlError, Result};
