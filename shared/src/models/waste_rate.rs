//! Waste rate quotations

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Rate quoted for a waste master on a given date
///
/// At most one quotation exists per (waste_master_id, rate_date).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WasteRate {
    pub id: i64,
    pub waste_master_id: i64,
    pub rate_date: NaiveDate,
    pub rate: Decimal,
    pub remarks: Option<String>,
}

impl WasteRate {
    pub fn quotes(&self, waste_master_id: i64, rate_date: NaiveDate) -> bool {
        self.waste_master_id == waste_master_id && self.rate_date == rate_date
    }
}
