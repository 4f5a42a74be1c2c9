//! Monetary derivation for sales-order lines and invoices
//!
//! Every monetary figure is rounded to 2 decimals where it is produced, and
//! only there. Weights and rates enter unrounded.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::{round_money, RatePer};

/// `total_wt * rate / rate_per`, rounded to 2 decimals
pub fn line_value(total_wt: Decimal, rate: Decimal, rate_per: RatePer) -> Decimal {
    round_money(total_wt * rate / rate_per.denominator())
}

/// Where an invoice's assessable value comes from
#[derive(Debug, Clone, PartialEq)]
pub enum AssessableBasis {
    /// Keyed in by the user
    Direct(Decimal),
    /// Net weight of the dispatched bales priced at a rate
    NetWeight {
        net_weight: Decimal,
        rate: Decimal,
        rate_per: RatePer,
    },
}

impl AssessableBasis {
    pub fn assessable_value(&self) -> Result<Decimal, ValidationError> {
        match self {
            AssessableBasis::Direct(amount) => {
                if *amount < Decimal::ZERO {
                    return Err(ValidationError::Negative {
                        field: "assessable_value",
                    });
                }
                Ok(round_money(*amount))
            }
            AssessableBasis::NetWeight {
                net_weight,
                rate,
                rate_per,
            } => {
                if *net_weight < Decimal::ZERO {
                    return Err(ValidationError::Negative {
                        field: "net_weight",
                    });
                }
                if *rate < Decimal::ZERO {
                    return Err(ValidationError::Negative { field: "rate" });
                }
                Ok(line_value(*net_weight, *rate, *rate_per))
            }
        }
    }
}

/// Derived invoice figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub assessable_value: Decimal,
    pub gst_percent: Decimal,
    pub gst: Decimal,
    /// Mirrors `assessable_value`
    pub sub_total: Decimal,
    pub invoice_value: Decimal,
}

impl InvoiceTotals {
    pub fn compute(basis: &AssessableBasis, gst_percent: Decimal) -> Result<Self, ValidationError> {
        if gst_percent < Decimal::ZERO {
            return Err(ValidationError::Negative {
                field: "gst_percent",
            });
        }

        let assessable_value = basis.assessable_value()?;
        let gst = gst_amount(assessable_value, gst_percent);

        Ok(Self {
            assessable_value,
            gst_percent,
            gst,
            sub_total: assessable_value,
            invoice_value: assessable_value + gst,
        })
    }
}

/// `assessable_value * gst_percent / 100`, rounded to 2 decimals
pub fn gst_amount(assessable_value: Decimal, gst_percent: Decimal) -> Decimal {
    round_money(assessable_value * gst_percent / Decimal::ONE_HUNDRED)
}

/// Invoice value for a directly entered assessable value
pub fn invoice_value(
    assessable_value: Decimal,
    gst_percent: Decimal,
) -> Result<Decimal, ValidationError> {
    InvoiceTotals::compute(&AssessableBasis::Direct(assessable_value), gst_percent)
        .map(|totals| totals.invoice_value)
}
