//! Monetary amounts as exact decimals.

use crate::utils::error::{EtlError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// Fractional digits a price may carry.
pub const AMOUNT_SCALE: u32 = 2;

/// A present price. Absence of price data is modelled as `Option::None`,
/// never as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonetaryAmount(Decimal);

impl MonetaryAmount {
    pub const ZERO: MonetaryAmount = MonetaryAmount(Decimal::ZERO);

    /// Accepts `value` if it has no more than [`AMOUNT_SCALE`] significant
    /// fractional digits. Trailing zeros do not count (`1.500` is fine).
    pub fn new(value: Decimal) -> Result<Self> {
        if value.normalize().scale() > AMOUNT_SCALE {
            return Err(EtlError::MalformedAmount {
                value: value.to_string(),
                reason: format!("more than {} decimal places", AMOUNT_SCALE),
            });
        }
        Ok(Self(value))
    }

    /// Parses a raw price field. `None` and `""` both mean "no price".
    pub fn parse(raw: Option<&str>) -> Result<Option<Self>> {
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(None),
        };

        let trimmed = raw.trim();
        let value = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|e| EtlError::MalformedAmount {
                value: raw.to_string(),
                reason: e.to_string(),
            })?;

        Self::new(value)
            .map(Some)
            .map_err(|e| match e {
                EtlError::MalformedAmount { reason, .. } => EtlError::MalformedAmount {
                    value: raw.to_string(),
                    reason,
                },
                other => other,
            })
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Nearest `f64`, for sinks that only know binary floats.
    pub fn to_f64(&self) -> f64 {
        decimal_to_f64(self.0)
    }
}

/// Nearest `f64` to an exact decimal.
pub fn decimal_to_f64(value: Decimal) -> f64 {
    // 經由十進位字串轉換，確保取得最接近的 f64
    value
        .to_string()
        .parse::<f64>()
        .ok()
        .or_else(|| value.to_f64())
        .unwrap_or_default()
}

impl From<MonetaryAmount> for Decimal {
    fn from(amount: MonetaryAmount) -> Self {
        amount.0
    }
}

impl fmt::Display for MonetaryAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_and_missing_are_null() {
        assert_eq!(MonetaryAmount::parse(None).unwrap(), None);
        assert_eq!(MonetaryAmount::parse(Some("")).unwrap(), None);
    }

    #[test]
    fn test_parse_exact_decimal() {
        let amount = MonetaryAmount::parse(Some("129.99")).unwrap().unwrap();
        assert_eq!(amount.value(), dec!(129.99));
        assert_eq!(amount.to_string(), "129.99");

        let amount = MonetaryAmount::parse(Some(" 99.5 ")).unwrap().unwrap();
        assert_eq!(amount.value(), dec!(99.50));
        assert_eq!(amount.to_string(), "99.50");
    }

    #[test]
    fn test_zero_is_not_null() {
        let amount = MonetaryAmount::parse(Some("0")).unwrap();
        assert_eq!(amount, Some(MonetaryAmount::ZERO));
        assert!(amount.unwrap().is_zero());
    }

    #[test]
    fn test_non_numeric_is_malformed() {
        for raw in ["abc", "12,50", "   ", "$10"] {
            match MonetaryAmount::parse(Some(raw)) {
                Err(EtlError::MalformedAmount { value, .. }) => assert_eq!(value, raw),
                other => panic!("expected MalformedAmount for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_extra_precision_is_rejected_not_rounded() {
        assert!(matches!(
            MonetaryAmount::parse(Some("1.234")),
            Err(EtlError::MalformedAmount { .. })
        ));
        // 尾端的零不算精度
        assert_eq!(
            MonetaryAmount::parse(Some("1.500")).unwrap().unwrap().value(),
            dec!(1.5)
        );
    }

    #[test]
    fn test_to_f64_is_nearest() {
        let amount = MonetaryAmount::new(dec!(129.99)).unwrap();
        assert_eq!(amount.to_f64(), 129.99);
    }
}
