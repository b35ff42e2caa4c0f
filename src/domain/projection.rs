use crate::domain::item_price::ItemPriceRecord;
use crate::domain::money::{decimal_to_f64, MonetaryAmount};
use crate::domain::region::Region;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Header row of the flat pricing table.
pub const OUTPUT_HEADER: [&str; 5] = ["SKU", "US Price", "US Sale Price", "CA Price", "CA Sale Price"];

#[derive(Debug, Clone, PartialEq)]
pub enum OutputValue {
    Text(String),
    Number(Decimal),
}

impl OutputValue {
    /// Integral amounts become JSON integers, everything else the nearest float.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            OutputValue::Text(text) => serde_json::Value::String(text.clone()),
            OutputValue::Number(number) => {
                if number.fract().is_zero() {
                    if let Some(int) = number.to_i64() {
                        return serde_json::Value::from(int);
                    }
                }
                serde_json::Number::from_f64(decimal_to_f64(*number))
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null)
            }
        }
    }
}

/// One output row: `[sku, US price, US sale, CA price, CA sale]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub sku: String,
    /// Regular and sale amount per region in [`Region::ALL`] order; missing prices are zero.
    pub amounts: Vec<Decimal>,
}

impl PriceRow {
    pub fn from_record(record: &ItemPriceRecord) -> Self {
        let amounts = Region::ALL
            .into_iter()
            .flat_map(|region| {
                let price = record.price(region);
                [price.regular_price, price.sale_price]
            })
            .map(|amount| amount.unwrap_or(MonetaryAmount::ZERO).value())
            .collect();

        Self {
            sku: record.sku().to_string(),
            amounts,
        }
    }

    pub fn values(&self) -> Vec<OutputValue> {
        std::iter::once(OutputValue::Text(self.sku.clone()))
            .chain(self.amounts.iter().copied().map(OutputValue::Number))
            .collect()
    }
}

impl From<&ItemPriceRecord> for PriceRow {
    fn from(record: &ItemPriceRecord) -> Self {
        PriceRow::from_record(record)
    }
}
