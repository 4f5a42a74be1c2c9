//! Invoice models

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::RecordStatus;
use crate::types::RatePer;
use crate::valuation::InvoiceTotals;

/// A tax invoice for dispatched waste
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invoice {
    pub id: i64,
    pub invoice_no: String,
    pub date: NaiveDate,
    pub party: String,
    pub sales_order_id: Option<i64>,
    /// Packings dispatched against this invoice
    #[serde(default)]
    pub packing_ids: Vec<i64>,
    /// Rate used when the assessable value is derived from net weight
    pub rate: Option<Decimal>,
    #[serde(default)]
    pub rate_per: RatePer,
    pub assessable_value: Decimal,
    pub gst_percent: Decimal,
    pub gst: Decimal,
    pub sub_total: Decimal,
    pub invoice_value: Decimal,
    #[serde(default)]
    pub status: RecordStatus,
}

impl Invoice {
    pub fn apply_totals(&mut self, totals: &InvoiceTotals) {
        self.assessable_value = totals.assessable_value;
        self.gst_percent = totals.gst_percent;
        self.gst = totals.gst;
        self.sub_total = totals.sub_total;
        self.invoice_value = totals.invoice_value;
    }
}
