//! Waste lot models

use serde::{Deserialize, Serialize};

/// A batch of waste cotton identified by its lot number
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WasteLot {
    pub id: i64,
    /// Unique, compared case-insensitively (e.g., "WCL-004")
    pub lot_no: String,
    pub waste_master_id: i64,
    pub active: bool,
}

impl WasteLot {
    /// Lot numbers are unique regardless of case
    pub fn same_lot_no(&self, lot_no: &str) -> bool {
        self.lot_no.trim().eq_ignore_ascii_case(lot_no.trim())
    }
}
