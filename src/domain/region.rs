use serde::{Deserialize, Serialize};
use std::fmt;

/// Pricing regions carried in the commerce export.
///
/// Only AMER is covered today; every completeness check downstream is
/// relative to [`Region::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Us,
    Ca,
}

impl Region {
    /// Declared regions, in output column order.
    pub const ALL: [Region; 2] = [Region::Us, Region::Ca];

    /// Key used for this region inside the pricing JSON payload.
    pub fn code(&self) -> &'static str {
        match self {
            Region::Us => "us",
            Region::Ca => "ca",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Region::Us => "US",
            Region::Ca => "CA",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_serde_names() {
        for region in Region::ALL {
            let json = serde_json::to_string(&region).unwrap();
            assert_eq!(json, format!("\"{}\"", region.code()));
        }
    }

    #[test]
    fn test_declared_order_is_output_order() {
        let mut sorted = Region::ALL;
        sorted.sort();
        assert_eq!(sorted, Region::ALL);
        assert_eq!(Region::ALL[0].to_string(), "US");
    }
}
