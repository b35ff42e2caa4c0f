//! Regional price pairs and the decoder for the per-product pricing JSON.
//!
//! The payload cell of a commerce export looks like
//! `{"us":{"price":"129.99","salePrice":"99.50"},"ca":{"price":"","salePrice":""}}`.

use crate::domain::money::MonetaryAmount;
use crate::domain::region::Region;
use crate::utils::error::{EtlError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, HashMap};

/// Regular and sale price for one region, before it is bound to a SKU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegionalPriceInfo {
    pub regular_price: Option<MonetaryAmount>,
    pub sale_price: Option<MonetaryAmount>,
}

impl RegionalPriceInfo {
    pub fn new(regular_price: Option<MonetaryAmount>, sale_price: Option<MonetaryAmount>) -> Self {
        Self {
            regular_price,
            sale_price,
        }
    }

    pub fn has_pricing(&self) -> bool {
        self.regular_price.is_some() && self.sale_price.is_some()
    }

    /// `(1 - sale / regular) * 100`, rounded half-up to 2 places.
    /// `None` when either price is missing or the regular price is zero.
    pub fn discount_percentage(&self) -> Option<Decimal> {
        let regular = self.regular_price?.value();
        let sale = self.sale_price?.value();
        if regular.is_zero() {
            return None;
        }

        let ratio = sale.checked_div(regular)?;
        let percent = (Decimal::ONE - ratio).checked_mul(Decimal::ONE_HUNDRED)?;
        Some(percent.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }

    pub fn savings_amount(&self) -> Option<Decimal> {
        let regular = self.regular_price?.value();
        let sale = self.sale_price?.value();
        regular.checked_sub(sale)
    }

    pub fn bind(self, sku: impl Into<String>, region: Region) -> RegionalPrice {
        RegionalPrice {
            sku: sku.into(),
            regular_price: self.regular_price,
            sale_price: self.sale_price,
            region,
        }
    }
}

/// A regional price resolved for one SKU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionalPrice {
    pub sku: String,
    pub regular_price: Option<MonetaryAmount>,
    pub sale_price: Option<MonetaryAmount>,
    pub region: Region,
}

impl RegionalPrice {
    pub fn info(&self) -> RegionalPriceInfo {
        RegionalPriceInfo::new(self.regular_price, self.sale_price)
    }

    pub fn has_pricing(&self) -> bool {
        self.info().has_pricing()
    }

    pub fn discount_percentage(&self) -> Option<Decimal> {
        self.info().discount_percentage()
    }

    pub fn savings_amount(&self) -> Option<Decimal> {
        self.info().savings_amount()
    }
}

// ---- wire schema ----------------------------------------------------------

/// Price fields arrive as strings; numbers are tolerated as well.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Text(String),
    Number(serde_json::Number),
}

impl RawAmount {
    fn into_amount(self) -> Result<Option<MonetaryAmount>> {
        match self {
            RawAmount::Text(text) => MonetaryAmount::parse(Some(&text)),
            RawAmount::Number(number) => MonetaryAmount::parse(Some(&number.to_string())),
        }
    }
}

/// Both keys must be present; `null` is allowed as a value.
#[derive(Debug, Deserialize)]
struct PriceInfoWire {
    #[serde(deserialize_with = "nullable")]
    price: Option<RawAmount>,
    #[serde(rename = "salePrice", deserialize_with = "nullable")]
    sale_price: Option<RawAmount>,
}

// 使用 deserialize_with 時缺少欄位會報錯，不會默默變成 None
fn nullable<'de, D>(deserializer: D) -> std::result::Result<Option<RawAmount>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::deserialize(deserializer)
}

impl PriceInfoWire {
    fn into_info(self) -> Result<RegionalPriceInfo> {
        let regular_price = match self.price {
            Some(raw) => raw.into_amount()?,
            None => None,
        };
        let sale_price = match self.sale_price {
            Some(raw) => raw.into_amount()?,
            None => None,
        };
        Ok(RegionalPriceInfo::new(regular_price, sale_price))
    }
}

type ProductPricingWire = HashMap<String, PriceInfoWire>;

/// Decodes a pricing payload into one [`RegionalPriceInfo`] per declared
/// region. Entries for undeclared regions must still be valid but are
/// otherwise ignored.
pub fn decode_price_infos(payload: &str, sku: &str) -> Result<BTreeMap<Region, RegionalPriceInfo>> {
    let mut wire: ProductPricingWire = serde_json::from_str(payload).map_err(|source| {
        // 先把原始內容寫進日誌，方便修正來源資料
        tracing::error!(sku = %sku, payload = %payload, "Malformed pricing payload");
        EtlError::MalformedPricingPayload {
            sku: sku.to_string(),
            payload: payload.to_string(),
            source,
        }
    })?;

    let mut infos = BTreeMap::new();
    for region in Region::ALL {
        let entry = wire
            .remove(region.code())
            .ok_or_else(|| EtlError::RegionNotFoundInPayload {
                sku: sku.to_string(),
                region,
            })?;
        infos.insert(region, entry.into_info()?);
    }

    if !wire.is_empty() {
        tracing::debug!(
            sku = %sku,
            "Ignoring undeclared regions in payload: {:?}",
            wire.keys().collect::<Vec<_>>()
        );
        for entry in wire.into_values() {
            entry.into_info()?;
        }
    }

    Ok(infos)
}

/// Decodes a pricing payload and binds every regional price to `sku`.
pub fn decode_regional_prices(payload: &str, sku: &str) -> Result<BTreeMap<Region, RegionalPrice>> {
    let prices = decode_price_infos(payload, sku)?
        .into_iter()
        .map(|(region, info)| (region, info.bind(sku, region)))
        .collect();
    Ok(prices)
}
