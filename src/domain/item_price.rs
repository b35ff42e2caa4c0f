use crate::domain::pricing::RegionalPrice;
use crate::domain::region::Region;
use crate::utils::error::{EtlError, Result};
use std::collections::BTreeMap;

/// One product with a price for every declared region.
///
/// Fields are private: a value only exists once both invariants have been
/// checked, and it cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPriceRecord {
    sku: String,
    prices: BTreeMap<Region, RegionalPrice>,
}

impl ItemPriceRecord {
    /// Validates and freezes a price map.
    ///
    /// Fails with [`EtlError::WrongRegionSku`] if any entry is bound to a
    /// different SKU, with [`EtlError::RegionMismatch`] if an entry is filed
    /// under another region's key, then with [`EtlError::MissingRegion`] if a
    /// declared region has no entry.
    pub fn new(sku: impl Into<String>, prices: BTreeMap<Region, RegionalPrice>) -> Result<Self> {
        let sku = sku.into();

        if let Some(price) = prices.values().find(|price| price.sku != sku) {
            return Err(EtlError::WrongRegionSku {
                expected: sku,
                found: price.sku.clone(),
                region: price.region,
            });
        }

        if let Some((key, price)) = prices.iter().find(|(key, price)| **key != price.region) {
            return Err(EtlError::RegionMismatch {
                sku,
                key: *key,
                found: price.region,
            });
        }

        if let Some(region) = Region::ALL.into_iter().find(|r| !prices.contains_key(r)) {
            return Err(EtlError::MissingRegion {
                sku,
                region,
                present: prices.len(),
                expected: Region::ALL.len(),
            });
        }

        Ok(Self { sku, prices })
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn price(&self, region: Region) -> &RegionalPrice {
        // 建構時已保證每個區域都有一筆
        &self.prices[&region]
    }

    pub fn prices(&self) -> impl Iterator<Item = &RegionalPrice> {
        self.prices.values()
    }

    /// True when every region has both a regular and a sale price.
    pub fn fully_priced(&self) -> bool {
        self.prices().all(RegionalPrice::has_pricing)
    }
}
