//! Packing type catalog

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a waste product is packed, with the tare and packing rate it carries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackingType {
    pub id: i64,
    /// Business code, unique and immutable once set
    pub code: i64,
    pub name: String,
    /// Empty packaging weight per bale (kg)
    pub tare_weight: Decimal,
    pub rate: Decimal,
}
