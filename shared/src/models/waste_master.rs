//! Waste master catalog

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Canonical definition of a waste product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WasteMaster {
    pub id: i64,
    /// Business code, unique and immutable once set
    pub code: i64,
    pub department: String,
    /// Waste name, e.g. "COMBER NOILS"
    pub waste: String,
    pub packing_type_id: i64,
    /// Stock on hand (kg)
    pub waste_kg: Decimal,
    pub hsn_code: Option<String>,
    /// Bales are weighed before packing rather than after
    #[serde(default)]
    pub packing_pre_weightment: bool,
}

impl WasteMaster {
    /// Case-insensitive substring match over the waste name or the decimal code
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.waste.to_lowercase().contains(&query) || self.code.to_string().contains(&query)
    }
}
