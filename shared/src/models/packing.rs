//! Waste packing and bale models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::RecordStatus;
use crate::error::ValidationError;
use crate::types::round_weight;

/// A physical packed unit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bale {
    pub bale_no: String,
    pub gross_weight: Decimal,
    pub tare_weight: Decimal,
    pub net_weight: Decimal,
}

impl Bale {
    pub fn new(bale_no: String, gross_weight: Decimal, tare_weight: Decimal) -> Self {
        Self {
            bale_no,
            gross_weight,
            tare_weight,
            net_weight: round_weight(gross_weight - tare_weight),
        }
    }

    /// Hand-edit the gross weight; net weight follows immediately
    pub fn set_gross_weight(&mut self, gross_weight: Decimal) -> Result<(), ValidationError> {
        if gross_weight < Decimal::ZERO {
            return Err(ValidationError::Negative {
                field: "gross_weight",
            });
        }
        self.gross_weight = gross_weight;
        self.recompute_net();
        Ok(())
    }

    /// Hand-edit the tare weight; net weight follows immediately
    pub fn set_tare_weight(&mut self, tare_weight: Decimal) -> Result<(), ValidationError> {
        if tare_weight < Decimal::ZERO {
            return Err(ValidationError::Negative {
                field: "tare_weight",
            });
        }
        self.tare_weight = tare_weight;
        self.recompute_net();
        Ok(())
    }

    pub fn recompute_net(&mut self) {
        self.net_weight = round_weight(self.gross_weight - self.tare_weight);
    }
}

/// One packing run for a lot
///
/// `tare_weight` and `rate` are snapshots taken when the lot was resolved and
/// do not follow later edits to the packing type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WastePacking {
    pub id: i64,
    pub lot_id: i64,
    pub lot_no: String,
    pub date: NaiveDate,
    pub total_weight: Decimal,
    pub no_of_bales: u32,
    pub tare_weight: Decimal,
    pub rate: Decimal,
    #[serde(default)]
    pub status: RecordStatus,
    pub details: Vec<Bale>,
}

impl WastePacking {
    pub fn gross_total(&self) -> Decimal {
        self.details.iter().map(|b| b.gross_weight).sum()
    }

    pub fn net_total(&self) -> Decimal {
        self.details.iter().map(|b| b.net_weight).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_net_weight_follows_edits() {
        let mut bale = Bale::new("WB240104001".to_string(), dec("25"), dec("2.5"));
        assert_eq!(bale.net_weight, dec("22.5"));

        bale.set_gross_weight(dec("30")).unwrap();
        assert_eq!(bale.net_weight, dec("27.5"));

        bale.set_tare_weight(dec("3.25")).unwrap();
        assert_eq!(bale.net_weight, dec("26.75"));
    }

    #[test]
    fn test_negative_edits_rejected() {
        let mut bale = Bale::new("WB240104001".to_string(), dec("25"), dec("2.5"));
        assert!(bale.set_gross_weight(dec("-1")).is_err());
        assert!(bale.set_tare_weight(dec("-0.5")).is_err());
        assert_eq!(bale.gross_weight, dec("25"));
        assert_eq!(bale.tare_weight, dec("2.5"));
    }
}
