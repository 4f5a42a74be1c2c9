//! Bale synthesis and weight reconciliation
//!
//! A packing run declares a total weight and a bale count. The generator
//! splits the total into individual bales and `reconcile` re-checks the
//! split after any hand edits, before the packing may be saved.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::models::Bale;
use crate::types::{round_weight, WEIGHT_TOLERANCE};

/// Prefix used for bale numbers when none is configured
pub const DEFAULT_BALE_PREFIX: &str = "WB";

/// Most bales one packing may hold; keeps the bale sequence at three digits
pub const MAX_BALES: u32 = 999;

/// Smallest weight step a bale is split into (1 g)
const GRAM: Decimal = Decimal::from_parts(1, 0, 0, false, 3);

/// Validated inputs for a generation run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BaleGenerationInput {
    pub total_weight: Decimal,
    pub bale_count: i64,
    pub tare_weight: Decimal,
}

impl BaleGenerationInput {
    fn validate(&self) -> Result<u32, ValidationError> {
        if self.total_weight <= Decimal::ZERO {
            return Err(ValidationError::NotPositive {
                field: "total_weight",
            });
        }
        if self.bale_count <= 0 {
            return Err(ValidationError::NotPositive {
                field: "bale_count",
            });
        }
        if self.tare_weight < Decimal::ZERO {
            return Err(ValidationError::Negative {
                field: "tare_weight",
            });
        }
        check_bale_count(self.bale_count, "bale_count")
    }
}

/// Bale count as a `u32` within `1..=MAX_BALES`
pub fn check_bale_count(count: i64, field: &'static str) -> Result<u32, ValidationError> {
    if count <= 0 {
        return Err(ValidationError::NotPositive { field });
    }
    u32::try_from(count)
        .ok()
        .filter(|n| *n <= MAX_BALES)
        .ok_or(ValidationError::AboveMaximum {
            field,
            max: MAX_BALES,
        })
}

/// Form state while the user is still typing; any field may be missing
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PackingDraftInput {
    pub total_weight: Option<Decimal>,
    pub bale_count: Option<i64>,
    pub tare_weight: Option<Decimal>,
}

impl PackingDraftInput {
    /// All three inputs are known
    pub fn is_complete(&self) -> bool {
        self.total_weight.is_some() && self.bale_count.is_some() && self.tare_weight.is_some()
    }

    pub fn to_generation_input(&self) -> Result<BaleGenerationInput, ValidationError> {
        Ok(BaleGenerationInput {
            total_weight: self.total_weight.ok_or(ValidationError::MissingField {
                field: "total_weight",
            })?,
            bale_count: self.bale_count.ok_or(ValidationError::MissingField {
                field: "bale_count",
            })?,
            tare_weight: self.tare_weight.ok_or(ValidationError::MissingField {
                field: "tare_weight",
            })?,
        })
    }
}

/// Builds bale numbers: prefix + YYMM + lot suffix + 3-digit sequence
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BaleNumbering {
    pub prefix: String,
    pub date: NaiveDate,
    pub lot_no: String,
}

impl BaleNumbering {
    pub fn new(prefix: impl Into<String>, date: NaiveDate, lot_no: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            date,
            lot_no: lot_no.into(),
        }
    }

    /// Last two characters of the lot number, uppercased
    pub fn lot_suffix(&self) -> String {
        let chars: Vec<char> = self.lot_no.trim().chars().collect();
        let start = chars.len().saturating_sub(2);
        chars[start..].iter().collect::<String>().to_uppercase()
    }

    /// Bale number for a 1-based sequence
    pub fn bale_no(&self, sequence: u32) -> String {
        format!(
            "{}{}{}{:03}",
            self.prefix,
            self.date.format("%y%m"),
            self.lot_suffix(),
            sequence
        )
    }
}

/// Split `total_weight` into `bale_count` bales
///
/// Each bale carries the average gross weight truncated to grams. The grams
/// left over go one each to the leading bales and any sub-gram residue of the
/// total lands on the last bale, so the gross weights always sum to the total.
pub fn generate(
    input: &BaleGenerationInput,
    numbering: &BaleNumbering,
) -> Result<Vec<Bale>, ValidationError> {
    let count = input.validate()?;

    let base = (input.total_weight / Decimal::from(count))
        .round_dp_with_strategy(3, RoundingStrategy::ToZero);
    let mut extra = input.total_weight - base * Decimal::from(count);

    let mut bales = Vec::with_capacity(count as usize);
    for sequence in 1..=count {
        let mut gross = base;
        if extra >= GRAM {
            gross += GRAM;
            extra -= GRAM;
        }
        if sequence == count {
            gross += extra;
        }
        bales.push(Bale::new(
            numbering.bale_no(sequence),
            gross,
            input.tare_weight,
        ));
    }

    Ok(bales)
}

/// Outcome of a passing reconciliation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reconciliation {
    pub bale_count: usize,
    pub expected_total: Decimal,
    pub gross_total: Decimal,
    pub net_total: Decimal,
    /// `gross_total - expected_total`
    pub difference: Decimal,
}

/// Check hand-edited bales against the declared total before saving
pub fn reconcile(
    bales: &[Bale],
    total_weight: Decimal,
    bale_count: u32,
) -> Result<Reconciliation, ValidationError> {
    if bales.len() != bale_count as usize {
        return Err(ValidationError::BaleCountMismatch {
            expected: bale_count,
            actual: bales.len(),
        });
    }

    for bale in bales {
        if bale.gross_weight < Decimal::ZERO {
            return Err(ValidationError::Negative {
                field: "gross_weight",
            });
        }
        if bale.tare_weight < Decimal::ZERO {
            return Err(ValidationError::Negative {
                field: "tare_weight",
            });
        }
        let net = round_weight(bale.gross_weight - bale.tare_weight);
        if net < Decimal::ZERO {
            return Err(ValidationError::NegativeNetWeight {
                bale_no: bale.bale_no.clone(),
                net_weight: net,
            });
        }
    }

    let gross_total: Decimal = bales.iter().map(|b| b.gross_weight).sum();
    let difference = gross_total - total_weight;
    if difference.abs() > WEIGHT_TOLERANCE {
        return Err(ValidationError::WeightMismatch {
            expected: total_weight,
            actual: gross_total,
            difference,
        });
    }

    Ok(Reconciliation {
        bale_count: bales.len(),
        expected_total: total_weight,
        gross_total,
        net_total: bales
            .iter()
            .map(|b| round_weight(b.gross_weight - b.tare_weight))
            .sum(),
        difference,
    })
}

/// Recompute every bale's net weight from its gross and tare
pub fn refresh_net_weights(bales: &mut [Bale]) {
    for bale in bales {
        bale.recompute_net();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn numbering() -> BaleNumbering {
        BaleNumbering::new(
            DEFAULT_BALE_PREFIX,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            "WCL-004",
        )
    }

    fn input(total: &str, count: i64, tare: &str) -> BaleGenerationInput {
        BaleGenerationInput {
            total_weight: dec(total),
            bale_count: count,
            tare_weight: dec(tare),
        }
    }

    #[test]
    fn test_bale_numbers() {
        let numbering = numbering();
        assert_eq!(numbering.lot_suffix(), "04");
        assert_eq!(numbering.bale_no(1), "WB240104001");
        assert_eq!(numbering.bale_no(125), "WB240104125");

        let short = BaleNumbering::new("WB", NaiveDate::from_ymd_opt(2023, 11, 2).unwrap(), "a");
        assert_eq!(short.bale_no(7), "WB2311A007");
    }

    #[test]
    fn test_even_split() {
        let bales = generate(&input("250.0", 10, "2.5"), &numbering()).unwrap();

        assert_eq!(bales.len(), 10);
        for bale in &bales {
            assert_eq!(bale.gross_weight, dec("25.000"));
            assert_eq!(bale.tare_weight, dec("2.5"));
            assert_eq!(bale.net_weight, dec("22.500"));
        }
        assert_eq!(bales[9].bale_no, "WB240104010");

        let result = reconcile(&bales, dec("250.0"), 10).unwrap();
        assert_eq!(result.gross_total, dec("250"));
        assert_eq!(result.net_total, dec("225"));
        assert_eq!(result.difference, Decimal::ZERO);
    }

    #[test]
    fn test_uneven_split_conserves_total() {
        let bales = generate(&input("100", 3, "0"), &numbering()).unwrap();

        assert_eq!(bales[0].gross_weight, dec("33.334"));
        assert_eq!(bales[1].gross_weight, dec("33.333"));
        assert_eq!(bales[2].gross_weight, dec("33.333"));
        let sum: Decimal = bales.iter().map(|b| b.gross_weight).sum();
        assert_eq!(sum, dec("100"));
    }

    #[test]
    fn test_sub_gram_residue_lands_on_last_bale() {
        let bales = generate(&input("10.0005", 2, "0"), &numbering()).unwrap();

        assert_eq!(bales[0].gross_weight, dec("5.000"));
        assert_eq!(bales[1].gross_weight, dec("5.0005"));
    }

    #[test]
    fn test_tiny_total_never_goes_negative() {
        let bales = generate(&input("0.005", 10, "0"), &numbering()).unwrap();

        assert!(bales.iter().all(|b| b.gross_weight >= Decimal::ZERO));
        let sum: Decimal = bales.iter().map(|b| b.gross_weight).sum();
        assert_eq!(sum, dec("0.005"));
    }

    #[test]
    fn test_rejects_invalid_inputs_before_generation() {
        assert_eq!(
            generate(&input("0", 10, "2.5"), &numbering()),
            Err(ValidationError::NotPositive {
                field: "total_weight"
            })
        );
        assert_eq!(
            generate(&input("250", 0, "2.5"), &numbering()),
            Err(ValidationError::NotPositive {
                field: "bale_count"
            })
        );
        assert!(generate(&input("250", -3, "2.5"), &numbering()).is_err());
        assert!(generate(&input("250", 10, "-1"), &numbering()).is_err());
    }

    #[test]
    fn test_edited_bale_breaks_reconciliation() {
        let mut bales = generate(&input("250.0", 10, "2.5"), &numbering()).unwrap();
        bales[0].set_gross_weight(dec("30.000")).unwrap();

        match reconcile(&bales, dec("250.0"), 10) {
            Err(ValidationError::WeightMismatch {
                expected,
                actual,
                difference,
            }) => {
                assert_eq!(expected, dec("250"));
                assert_eq!(actual, dec("255"));
                assert_eq!(difference, dec("5.0"));
            }
            other => panic!("expected weight mismatch, got {:?}", other),
        }

        // Balancing the edit elsewhere passes again
        bales[1].set_gross_weight(dec("20.000")).unwrap();
        assert!(reconcile(&bales, dec("250.0"), 10).is_ok());
    }

    #[test]
    fn test_reconcile_within_tolerance() {
        let mut bales = generate(&input("250.0", 10, "2.5"), &numbering()).unwrap();
        bales[3].set_gross_weight(dec("25.001")).unwrap();
        assert!(reconcile(&bales, dec("250.0"), 10).is_ok());

        bales[4].set_gross_weight(dec("25.001")).unwrap();
        assert!(reconcile(&bales, dec("250.0"), 10).is_err());
    }

    #[test]
    fn test_reconcile_requires_every_bale() {
        let mut bales = generate(&input("250.0", 10, "2.5"), &numbering()).unwrap();
        bales.pop();

        assert_eq!(
            reconcile(&bales, dec("250.0"), 10),
            Err(ValidationError::BaleCountMismatch {
                expected: 10,
                actual: 9
            })
        );
    }

    #[test]
    fn test_reconcile_rejects_tare_above_gross() {
        let mut bales = generate(&input("20", 2, "2.5"), &numbering()).unwrap();
        bales[0].set_tare_weight(dec("11")).unwrap();
        bales[0].set_gross_weight(dec("10")).unwrap();

        assert!(matches!(
            reconcile(&bales, dec("20"), 2),
            Err(ValidationError::NegativeNetWeight { .. })
        ));
    }

    #[test]
    fn test_bale_count_is_capped() {
        let bales = generate(&input("999", 999, "0"), &numbering()).unwrap();
        assert_eq!(bales[998].bale_no, "WB240104999");

        assert_eq!(
            generate(&input("1000", 1000, "0"), &numbering()),
            Err(ValidationError::AboveMaximum {
                field: "bale_count",
                max: MAX_BALES
            })
        );
        assert!(generate(&input("250", 2_000_000_000, "0"), &numbering()).is_err());
        assert!(generate(&input("250", i64::MAX, "0"), &numbering()).is_err());
    }

    #[test]
    fn test_reconcile_rejects_negative_bale_weights() {
        let mut bales = generate(&input("25", 2, "2.5"), &numbering()).unwrap();
        bales[0].gross_weight = dec("30");
        bales[1].gross_weight = dec("-5");
        assert_eq!(
            reconcile(&bales, dec("25"), 2),
            Err(ValidationError::Negative {
                field: "gross_weight"
            })
        );

        let mut bales = generate(&input("25", 2, "2.5"), &numbering()).unwrap();
        bales[1].tare_weight = dec("-9");
        assert_eq!(
            reconcile(&bales, dec("25"), 2),
            Err(ValidationError::Negative {
                field: "tare_weight"
            })
        );
    }

    #[test]
    fn test_partial_draft_does_not_generate() {
        let draft = PackingDraftInput {
            total_weight: Some(dec("250")),
            bale_count: None,
            tare_weight: Some(dec("2.5")),
        };
        assert!(!draft.is_complete());
        assert_eq!(
            draft.to_generation_input(),
            Err(ValidationError::MissingField {
                field: "bale_count"
            })
        );

        let complete = PackingDraftInput {
            bale_count: Some(10),
            ..draft
        };
        assert!(complete.is_complete());
        assert!(generate(&complete.to_generation_input().unwrap(), &numbering()).is_ok());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_generation_conserves_weight(
            total_grams in 1i64..=5_000_000i64,
            count in 1i64..=300i64,
            tare_grams in 0i64..=5_000i64
        ) {
            let generation = BaleGenerationInput {
                total_weight: Decimal::new(total_grams, 3),
                bale_count: count,
                tare_weight: Decimal::new(tare_grams, 3),
            };
            let bales = generate(&generation, &numbering()).unwrap();

            prop_assert_eq!(bales.len(), count as usize);

            let sum: Decimal = bales.iter().map(|b| b.gross_weight).sum();
            prop_assert!((sum - generation.total_weight).abs() <= WEIGHT_TOLERANCE);

            let avg = generation.total_weight / Decimal::from(count);
            for bale in &bales {
                prop_assert!(bale.gross_weight >= Decimal::ZERO);
                prop_assert!((bale.gross_weight - avg).abs() <= GRAM);
                prop_assert_eq!(bale.net_weight, round_weight(bale.gross_weight - bale.tare_weight));
            }
        }

        #[test]
        fn prop_single_edit_without_rebalancing_is_rejected(
            count in 2i64..=50i64,
            index in 0usize..50,
            delta_grams in 2i64..=10_000i64
        ) {
            let generation = BaleGenerationInput {
                total_weight: Decimal::from(count * 40),
                bale_count: count,
                tare_weight: Decimal::ZERO,
            };
            let mut bales = generate(&generation, &numbering()).unwrap();
            let index = index % bales.len();
            let edited = bales[index].gross_weight + Decimal::new(delta_grams, 3);
            bales[index].set_gross_weight(edited).unwrap();

            prop_assert!(reconcile(&bales, generation.total_weight, count as u32).is_err());
        }
    }
}
