//! Which waste masters can still be quoted on a given date

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::models::{WasteMaster, WasteRate};

/// Masters with no rate recorded for `date`, in their original order
pub fn available_for_date<'a>(
    date: NaiveDate,
    masters: &'a [WasteMaster],
    rates: &[WasteRate],
) -> Vec<&'a WasteMaster> {
    let quoted: HashSet<i64> = rates
        .iter()
        .filter(|r| r.rate_date == date)
        .map(|r| r.waste_master_id)
        .collect();

    masters.iter().filter(|m| !quoted.contains(&m.id)).collect()
}

/// Narrow a master list by a case-insensitive substring of the waste name or code
pub fn search_masters<'a>(masters: Vec<&'a WasteMaster>, query: &str) -> Vec<&'a WasteMaster> {
    masters.into_iter().filter(|m| m.matches_query(query)).collect()
}

/// Write-boundary check for the (waste master, date) uniqueness rule
///
/// `exclude_id` is the rate being updated, which may keep its own pair.
pub fn ensure_rate_unique(
    waste_master_id: i64,
    rate_date: NaiveDate,
    rates: &[WasteRate],
    exclude_id: Option<i64>,
) -> Result<(), ValidationError> {
    let duplicate = rates
        .iter()
        .filter(|r| Some(r.id) != exclude_id)
        .any(|r| r.quotes(waste_master_id, rate_date));

    if duplicate {
        return Err(ValidationError::DuplicateRate {
            waste_master_id,
            rate_date,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn master(id: i64, code: i64, waste: &str) -> WasteMaster {
        WasteMaster {
            id,
            code,
            department: "SPINNING".to_string(),
            waste: waste.to_string(),
            packing_type_id: 1,
            waste_kg: Decimal::ZERO,
            hsn_code: None,
            packing_pre_weightment: false,
        }
    }

    fn rate(id: i64, waste_master_id: i64, date: NaiveDate) -> WasteRate {
        WasteRate {
            id,
            waste_master_id,
            rate_date: date,
            rate: Decimal::from(40),
            remarks: None,
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_excludes_masters_quoted_that_day() {
        let masters = vec![
            master(7, 107, "COMBER NOILS"),
            master(8, 108, "FLAT STRIPS"),
            master(9, 109, "SOFT WASTE"),
        ];
        let rates = vec![rate(1, 7, day(1)), rate(2, 8, day(2))];

        let available: Vec<i64> = available_for_date(day(1), &masters, &rates)
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(available, vec![8, 9]);

        let next_day: Vec<i64> = available_for_date(day(2), &masters, &rates)
            .iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(next_day, vec![7, 9]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let masters = vec![master(7, 107, "COMBER NOILS"), master(8, 108, "FLAT STRIPS")];
        let rates = vec![rate(1, 7, day(1))];

        let first = available_for_date(day(1), &masters, &rates);
        let second = available_for_date(day(1), &masters, &rates);
        assert_eq!(first, second);
    }

    #[test]
    fn test_search_composes_after_filter() {
        let masters = vec![
            master(7, 107, "COMBER NOILS"),
            master(8, 108, "FLAT STRIPS"),
            master(9, 209, "Comber Waste"),
        ];
        let rates = vec![rate(1, 7, day(1))];

        let found = search_masters(available_for_date(day(1), &masters, &rates), "comber");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 9);

        let by_code = search_masters(available_for_date(day(1), &masters, &rates), "10");
        assert_eq!(by_code.iter().map(|m| m.id).collect::<Vec<_>>(), vec![8]);

        let everything = search_masters(available_for_date(day(1), &masters, &rates), "  ");
        assert_eq!(everything.len(), 2);
    }

    #[test]
    fn test_rate_uniqueness() {
        let rates = vec![rate(1, 7, day(1))];

        assert!(ensure_rate_unique(7, day(2), &rates, None).is_ok());
        assert!(ensure_rate_unique(8, day(1), &rates, None).is_ok());
        assert_eq!(
            ensure_rate_unique(7, day(1), &rates, None),
            Err(ValidationError::DuplicateRate {
                waste_master_id: 7,
                rate_date: day(1)
            })
        );
        // A rate may be re-saved with its own pair
        assert!(ensure_rate_unique(7, day(1), &rates, Some(1)).is_ok());
    }
}
