//! Error taxonomy for the billing core
//!
//! `ValidationError` blocks a submission until the input is corrected.
//! `LookupError` means a reference chain is broken and dependent fields must be cleared.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::RecordStatus;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("{field} cannot be negative")]
    Negative { field: &'static str },

    #[error("{field} cannot exceed {max}")]
    AboveMaximum { field: &'static str, max: u32 },

    #[error("Code {code} is already used by another {kind}")]
    DuplicateCode { kind: &'static str, code: i64 },

    #[error("Lot number {0} already exists")]
    DuplicateLotNo(String),

    #[error("A rate for waste master {waste_master_id} on {rate_date} already exists")]
    DuplicateRate {
        waste_master_id: i64,
        rate_date: NaiveDate,
    },

    #[error("Bale gross weights sum to {actual} but total weight is {expected} (difference {difference})")]
    WeightMismatch {
        expected: Decimal,
        actual: Decimal,
        difference: Decimal,
    },

    #[error("Expected {expected} bales but found {actual}")]
    BaleCountMismatch { expected: u32, actual: usize },

    #[error("Bale {bale_no} has a net weight of {net_weight}")]
    NegativeNetWeight { bale_no: String, net_weight: Decimal },

    #[error("{kind} code cannot be changed once set")]
    ImmutableCode { kind: &'static str },

    #[error("Invalid rate-per value {0}; expected 1, 100 or 1000")]
    InvalidRatePer(String),

    #[error("Cannot move a record from {from} to {to}")]
    InvalidTransition { from: RecordStatus, to: RecordStatus },

    #[error("{kind} {id} is approved and can no longer be changed")]
    Locked { kind: &'static str, id: i64 },

    #[error("{kind} {id} is still referenced by a {dependent}")]
    InUse {
        kind: &'static str,
        id: i64,
        dependent: &'static str,
    },

    #[error("{kind} {id} does not exist")]
    MissingReference { kind: &'static str, id: i64 },
}

impl ValidationError {
    /// Input field the error should be shown next to, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::NotPositive { field }
            | ValidationError::Negative { field }
            | ValidationError::AboveMaximum { field, .. } => Some(field),
            ValidationError::DuplicateCode { .. } | ValidationError::ImmutableCode { .. } => {
                Some("code")
            }
            ValidationError::DuplicateLotNo(_) => Some("lot_no"),
            ValidationError::DuplicateRate { .. } => Some("rate_date"),
            ValidationError::WeightMismatch { .. }
            | ValidationError::BaleCountMismatch { .. }
            | ValidationError::NegativeNetWeight { .. } => Some("details"),
            ValidationError::InvalidRatePer(_) => Some("rate_per"),
            _ => None,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            ValidationError::DuplicateCode { .. }
                | ValidationError::DuplicateLotNo(_)
                | ValidationError::DuplicateRate { .. }
        )
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Lot {0} was not found")]
    LotNotFound(String),

    #[error("Lot {0} is inactive")]
    LotInactive(String),

    #[error("Lot {lot_no} refers to waste master {waste_master_id}, which does not exist")]
    WasteMasterMissing { lot_no: String, waste_master_id: i64 },

    #[error("Waste master {waste_master_id} refers to packing type {packing_type_id}, which does not exist")]
    PackingTypeMissing {
        waste_master_id: i64,
        packing_type_id: i64,
    },
}
