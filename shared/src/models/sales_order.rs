//! Sales order models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::RatePer;
use crate::valuation::line_value;

/// A sales order for waste material
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesOrder {
    pub id: i64,
    pub order_no: String,
    pub date: NaiveDate,
    pub party: String,
    pub lines: Vec<SalesOrderLine>,
    #[serde(default)]
    pub total_value: Decimal,
}

/// One waste product on a sales order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SalesOrderLine {
    pub waste_master_id: i64,
    /// Number of bales
    pub qty: u32,
    /// Total weight (kg)
    pub total_wt: Decimal,
    pub rate: Decimal,
    pub rate_per: RatePer,
    /// Derived: `total_wt * rate / rate_per`
    #[serde(default)]
    pub value: Decimal,
}

impl SalesOrderLine {
    pub fn recompute(&mut self) {
        self.value = line_value(self.total_wt, self.rate, self.rate_per);
    }
}

impl SalesOrder {
    /// Recompute every line value and the order total
    pub fn recompute(&mut self) {
        for line in &mut self.lines {
            line.recompute();
        }
        self.total_value = self.lines.iter().map(|l| l.value).sum();
    }
}
