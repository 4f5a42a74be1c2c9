//! Common types used across the platform

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Allowed drift between the declared total weight and the sum of bale weights (kg)
pub const WEIGHT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 3);

/// GST percentage applied when an invoice does not specify one
pub const DEFAULT_GST_PERCENT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Round a weight to 3 decimals (grams), always carrying 3 decimal places
pub fn round_weight(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(3);
    rounded
}

/// Round a monetary amount to 2 decimals (paise), always carrying 2 decimal places
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Quantity denominator a quoted rate is expressed against
///
/// A rate of 50 with `Per100Kg` means 50 per 100 kg of material.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(try_from = "RatePerRepr", into = "u32")]
pub enum RatePer {
    #[default]
    PerKg,
    Per100Kg,
    Per1000Kg,
}

impl RatePer {
    pub fn denominator(&self) -> Decimal {
        Decimal::from(self.kilograms())
    }

    pub fn kilograms(&self) -> u32 {
        match self {
            RatePer::PerKg => 1,
            RatePer::Per100Kg => 100,
            RatePer::Per1000Kg => 1000,
        }
    }
}

impl TryFrom<u32> for RatePer {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(RatePer::PerKg),
            100 => Ok(RatePer::Per100Kg),
            1000 => Ok(RatePer::Per1000Kg),
            other => Err(ValidationError::InvalidRatePer(other.to_string())),
        }
    }
}

impl FromStr for RatePer {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kilograms: u32 = s
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidRatePer(s.to_string()))?;
        RatePer::try_from(kilograms)
    }
}

impl From<RatePer> for u32 {
    fn from(value: RatePer) -> Self {
        value.kilograms()
    }
}

impl std::fmt::Display for RatePer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RatePer::PerKg => write!(f, "per kg"),
            RatePer::Per100Kg => write!(f, "per 100 kg"),
            RatePer::Per1000Kg => write!(f, "per 1000 kg"),
        }
    }
}

/// Legacy payloads send the denominator as `"100"` rather than `100`
#[derive(Deserialize)]
#[serde(untagged)]
enum RatePerRepr {
    Number(u32),
    Text(String),
}

impl TryFrom<RatePerRepr> for RatePer {
    type Error = ValidationError;

    fn try_from(value: RatePerRepr) -> Result<Self, Self::Error> {
        match value {
            RatePerRepr::Number(n) => RatePer::try_from(n),
            RatePerRepr::Text(s) => s.parse(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_per_parsing() {
        assert_eq!("1".parse::<RatePer>().unwrap(), RatePer::PerKg);
        assert_eq!(" 100 ".parse::<RatePer>().unwrap(), RatePer::Per100Kg);
        assert_eq!("1000".parse::<RatePer>().unwrap(), RatePer::Per1000Kg);
        assert!("10".parse::<RatePer>().is_err());
        assert!("per kg".parse::<RatePer>().is_err());
    }

    #[test]
    fn test_rate_per_serde_accepts_number_and_string() {
        let from_number: RatePer = serde_json::from_str("100").unwrap();
        let from_text: RatePer = serde_json::from_str("\"1000\"").unwrap();
        assert_eq!(from_number, RatePer::Per100Kg);
        assert_eq!(from_text, RatePer::Per1000Kg);
        assert!(serde_json::from_str::<RatePer>("50").is_err());

        assert_eq!(serde_json::to_string(&RatePer::Per100Kg).unwrap(), "100");
    }

    #[test]
    fn test_rounding_is_half_away_from_zero() {
        assert_eq!(round_money(Decimal::new(12345, 3)), Decimal::new(1235, 2));
        assert_eq!(round_weight(Decimal::new(250005, 4)), Decimal::new(25001, 3));
        assert_eq!(WEIGHT_TOLERANCE, Decimal::new(1, 3));
    }

    #[test]
    fn test_rounded_values_carry_fixed_places() {
        assert_eq!(round_money(Decimal::from(1050)).to_string(), "1050.00");
        assert_eq!(round_weight(Decimal::new(225, 1)).to_string(), "22.500");
    }
}
