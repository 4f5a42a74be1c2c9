//! Validation utilities for the cotton waste billing platform

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::models::{PackingType, SalesOrder, WasteLot, WasteMaster, WasteRate};

// ============================================================================
// Field Validations
// ============================================================================

pub fn require_text(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField { field });
    }
    Ok(())
}

pub fn require_positive(value: Decimal, field: &'static str) -> Result<(), ValidationError> {
    if value <= Decimal::ZERO {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(())
}

pub fn require_non_negative(value: Decimal, field: &'static str) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::Negative { field });
    }
    Ok(())
}

fn require_code(code: i64) -> Result<(), ValidationError> {
    if code <= 0 {
        return Err(ValidationError::NotPositive { field: "code" });
    }
    Ok(())
}

// ============================================================================
// Catalog Validations
// ============================================================================

pub fn validate_packing_type(packing_type: &PackingType) -> Result<(), ValidationError> {
    require_code(packing_type.code)?;
    require_text(&packing_type.name, "name")?;
    require_non_negative(packing_type.tare_weight, "tare_weight")?;
    require_non_negative(packing_type.rate, "rate")
}

pub fn validate_waste_master(master: &WasteMaster) -> Result<(), ValidationError> {
    require_code(master.code)?;
    require_text(&master.department, "department")?;
    require_text(&master.waste, "waste")?;
    require_non_negative(master.waste_kg, "waste_kg")
}

pub fn validate_waste_lot(lot: &WasteLot) -> Result<(), ValidationError> {
    require_text(&lot.lot_no, "lot_no")
}

pub fn validate_waste_rate(rate: &WasteRate) -> Result<(), ValidationError> {
    require_positive(rate.rate, "rate")
}

pub fn validate_sales_order(order: &SalesOrder) -> Result<(), ValidationError> {
    require_text(&order.order_no, "order_no")?;
    require_text(&order.party, "party")?;
    if order.lines.is_empty() {
        return Err(ValidationError::MissingField { field: "lines" });
    }
    for line in &order.lines {
        require_positive(line.total_wt, "total_wt")?;
        require_non_negative(line.rate, "rate")?;
    }
    Ok(())
}

// ============================================================================
// Uniqueness
// ============================================================================

/// Codes must be unique within a catalog; `exclude_id` is the record being updated
pub fn ensure_code_unique<T>(
    kind: &'static str,
    code: i64,
    existing: &[T],
    code_of: impl Fn(&T) -> (i64, i64),
    exclude_id: Option<i64>,
) -> Result<(), ValidationError> {
    let taken = existing
        .iter()
        .map(code_of)
        .any(|(id, c)| c == code && Some(id) != exclude_id);
    if taken {
        return Err(ValidationError::DuplicateCode { kind, code });
    }
    Ok(())
}

/// Lot numbers must be unique regardless of case
pub fn ensure_lot_no_unique(
    lot_no: &str,
    existing: &[WasteLot],
    exclude_id: Option<i64>,
) -> Result<(), ValidationError> {
    if existing
        .iter()
        .any(|l| l.same_lot_no(lot_no) && Some(l.id) != exclude_id)
    {
        return Err(ValidationError::DuplicateLotNo(lot_no.trim().to_string()));
    }
    Ok(())
}

/// Codes are immutable once set
pub fn ensure_code_unchanged(
    kind: &'static str,
    stored: i64,
    requested: Option<i64>,
) -> Result<(), ValidationError> {
    match requested {
        Some(code) if code != stored => Err(ValidationError::ImmutableCode { kind }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SalesOrderLine;
    use crate::types::RatePer;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn lot(id: i64, lot_no: &str) -> WasteLot {
        WasteLot {
            id,
            lot_no: lot_no.to_string(),
            waste_master_id: 7,
            active: true,
        }
    }

    #[test]
    fn test_packing_type_validation() {
        let mut packing_type = PackingType {
            id: 0,
            code: 3,
            name: "HDPE BAG".to_string(),
            tare_weight: dec("2.5"),
            rate: dec("12"),
        };
        assert!(validate_packing_type(&packing_type).is_ok());

        packing_type.tare_weight = dec("-0.1");
        assert_eq!(
            validate_packing_type(&packing_type),
            Err(ValidationError::Negative {
                field: "tare_weight"
            })
        );

        packing_type.tare_weight = Decimal::ZERO;
        packing_type.name = "   ".to_string();
        assert!(validate_packing_type(&packing_type).is_err());
    }

    #[test]
    fn test_waste_rate_must_be_positive() {
        let mut rate = WasteRate {
            id: 0,
            waste_master_id: 7,
            rate_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            rate: dec("48.5"),
            remarks: None,
        };
        assert!(validate_waste_rate(&rate).is_ok());

        rate.rate = Decimal::ZERO;
        assert_eq!(
            validate_waste_rate(&rate),
            Err(ValidationError::NotPositive { field: "rate" })
        );
    }

    #[test]
    fn test_lot_numbers_unique_case_insensitive() {
        let existing = vec![lot(1, "WCL-004")];

        assert!(ensure_lot_no_unique("WCL-005", &existing, None).is_ok());
        assert_eq!(
            ensure_lot_no_unique("wcl-004", &existing, None),
            Err(ValidationError::DuplicateLotNo("wcl-004".to_string()))
        );
        assert!(ensure_lot_no_unique("wcl-004", &existing, Some(1)).is_ok());
    }

    #[test]
    fn test_code_uniqueness() {
        let existing = vec![(1i64, 107i64), (2, 108)];

        assert!(ensure_code_unique("waste master", 109, &existing, |e| *e, None).is_ok());
        assert!(ensure_code_unique("waste master", 108, &existing, |e| *e, None).is_err());
        assert!(ensure_code_unique("waste master", 108, &existing, |e| *e, Some(2)).is_ok());
    }

    #[test]
    fn test_code_is_immutable() {
        assert!(ensure_code_unchanged("packing type", 3, None).is_ok());
        assert!(ensure_code_unchanged("packing type", 3, Some(3)).is_ok());
        assert_eq!(
            ensure_code_unchanged("packing type", 3, Some(4)),
            Err(ValidationError::ImmutableCode {
                kind: "packing type"
            })
        );
    }

    #[test]
    fn test_sales_order_needs_lines() {
        let mut order = SalesOrder {
            id: 0,
            order_no: "SO-001".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            party: "Sri Lakshmi Traders".to_string(),
            lines: vec![],
            total_value: Decimal::ZERO,
        };
        assert!(validate_sales_order(&order).is_err());

        order.lines.push(SalesOrderLine {
            waste_master_id: 7,
            qty: 10,
            total_wt: dec("250"),
            rate: dec("45"),
            rate_per: RatePer::PerKg,
            value: Decimal::ZERO,
        });
        assert!(validate_sales_order(&order).is_ok());
    }
}
