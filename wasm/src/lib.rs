//! WebAssembly module for the Cotton Waste Billing Platform
//!
//! Provides client-side computation for:
//! - Lot resolution against cached catalogs
//! - Rate availability for the rate entry picker
//! - Bale generation and weight reconciliation while editing a packing
//! - Sales-order line values and invoice GST totals
//!
//! Records cross the boundary as JSON strings; weights and money as `f64`.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

use shared::availability::{available_for_date, search_masters};
use shared::bale::{generate, reconcile, BaleGenerationInput, BaleNumbering};
use shared::models::{Bale, PackingType, WasteLot, WasteMaster, WasteRate};
use shared::resolution::resolve_lot;
use shared::valuation::{line_value, AssessableBasis, InvoiceTotals};
use shared::RatePer;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {}

fn to_decimal(value: f64, field: &str) -> Result<Decimal, String> {
    Decimal::try_from(value).map_err(|_| format!("{} is not a finite number", field))
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

fn parse_json<T: DeserializeOwned>(json: &str, what: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

fn parse_date(date: &str) -> Result<NaiveDate, String> {
    NaiveDate::from_str(date.trim()).map_err(|e| format!("Invalid date {}: {}", date, e))
}

fn resolve(lot_no: &str, lots: &str, masters: &str, packing_types: &str) -> Result<String, String> {
    let lots: Vec<WasteLot> = parse_json(lots, "lots")?;
    let masters: Vec<WasteMaster> = parse_json(masters, "waste masters")?;
    let packing_types: Vec<PackingType> = parse_json(packing_types, "packing types")?;

    let context =
        resolve_lot(lot_no, &lots, &masters, &packing_types).map_err(|e| e.to_string())?;
    to_json(&context)
}

fn available(date: &str, masters: &str, rates: &str, query: &str) -> Result<String, String> {
    let date = parse_date(date)?;
    let masters: Vec<WasteMaster> = parse_json(masters, "waste masters")?;
    let rates: Vec<WasteRate> = parse_json(rates, "waste rates")?;

    let candidates = search_masters(available_for_date(date, &masters, &rates), query);
    to_json(&candidates)
}

fn generate_json(
    total_weight: f64,
    bale_count: i32,
    tare_weight: f64,
    prefix: &str,
    date: &str,
    lot_no: &str,
) -> Result<String, String> {
    let input = BaleGenerationInput {
        total_weight: to_decimal(total_weight, "total_weight")?,
        bale_count: i64::from(bale_count),
        tare_weight: to_decimal(tare_weight, "tare_weight")?,
    };
    let numbering = BaleNumbering::new(prefix, parse_date(date)?, lot_no);

    let bales = generate(&input, &numbering).map_err(|e| e.to_string())?;
    to_json(&bales)
}

fn reconcile_json(bales: &str, total_weight: f64, bale_count: u32) -> Result<String, String> {
    let mut bales: Vec<Bale> = parse_json(bales, "bales")?;
    for bale in &mut bales {
        bale.recompute_net();
    }

    let reconciliation = reconcile(&bales, to_decimal(total_weight, "total_weight")?, bale_count)
        .map_err(|e| e.to_string())?;
    to_json(&reconciliation)
}

fn line_value_of(total_wt: f64, rate: f64, rate_per: u32) -> Result<Decimal, String> {
    let rate_per = RatePer::try_from(rate_per).map_err(|e| e.to_string())?;
    Ok(line_value(
        to_decimal(total_wt, "total_wt")?,
        to_decimal(rate, "rate")?,
        rate_per,
    ))
}

fn invoice_totals_json(
    assessable_value: Option<f64>,
    net_weight: f64,
    rate: f64,
    rate_per: u32,
    gst_percent: f64,
) -> Result<String, String> {
    let basis = match assessable_value {
        Some(amount) => AssessableBasis::Direct(to_decimal(amount, "assessable_value")?),
        None => AssessableBasis::NetWeight {
            net_weight: to_decimal(net_weight, "net_weight")?,
            rate: to_decimal(rate, "rate")?,
            rate_per: RatePer::try_from(rate_per).map_err(|e| e.to_string())?,
        },
    };

    let totals = InvoiceTotals::compute(&basis, to_decimal(gst_percent, "gst_percent")?)
        .map_err(|e| e.to_string())?;
    to_json(&totals)
}

/// Resolve a lot number to its waste master, packing type and snapshot (JSON)
#[wasm_bindgen]
pub fn resolve_lot_context(
    lot_no: &str,
    lots_json: &str,
    masters_json: &str,
    packing_types_json: &str,
) -> Result<String, JsValue> {
    resolve(lot_no, lots_json, masters_json, packing_types_json).map_err(|e| JsValue::from_str(&e))
}

/// Waste masters without a rate on `date`, narrowed by `query`
#[wasm_bindgen]
pub fn available_masters(
    date: &str,
    masters_json: &str,
    rates_json: &str,
    query: &str,
) -> Result<String, JsValue> {
    available(date, masters_json, rates_json, query).map_err(|e| JsValue::from_str(&e))
}

/// Split a packing's total weight into numbered bales
#[wasm_bindgen]
pub fn generate_bales(
    total_weight: f64,
    bale_count: i32,
    tare_weight: f64,
    prefix: &str,
    date: &str,
    lot_no: &str,
) -> Result<String, JsValue> {
    generate_json(total_weight, bale_count, tare_weight, prefix, date, lot_no)
        .map_err(|e| JsValue::from_str(&e))
}

/// Check edited bales against the declared total before submitting
#[wasm_bindgen]
pub fn reconcile_bales(bales_json: &str, total_weight: f64, bale_count: u32) -> Result<String, JsValue> {
    reconcile_json(bales_json, total_weight, bale_count).map_err(|e| JsValue::from_str(&e))
}

/// Net weight of one bale, rounded to grams
#[wasm_bindgen]
pub fn calculate_net_weight(gross_weight: f64, tare_weight: f64) -> f64 {
    let gross = Decimal::try_from(gross_weight).unwrap_or(Decimal::ZERO);
    let tare = Decimal::try_from(tare_weight).unwrap_or(Decimal::ZERO);
    to_f64(shared::round_weight(gross - tare))
}

/// Sales-order line value; `rate_per` is 1, 100 or 1000
#[wasm_bindgen]
pub fn calculate_line_value(total_wt: f64, rate: f64, rate_per: u32) -> Result<f64, JsValue> {
    line_value_of(total_wt, rate, rate_per)
        .map(to_f64)
        .map_err(|e| JsValue::from_str(&e))
}

/// Invoice totals for a keyed-in assessable value
#[wasm_bindgen]
pub fn calculate_invoice_totals(assessable_value: f64, gst_percent: f64) -> Result<String, JsValue> {
    invoice_totals_json(Some(assessable_value), 0.0, 0.0, 1, gst_percent)
        .map_err(|e| JsValue::from_str(&e))
}

/// Invoice totals priced from the dispatched net weight
#[wasm_bindgen]
pub fn calculate_invoice_totals_from_weight(
    net_weight: f64,
    rate: f64,
    rate_per: u32,
    gst_percent: f64,
) -> Result<String, JsValue> {
    invoice_totals_json(None, net_weight, rate, rate_per, gst_percent)
        .map_err(|e| JsValue::from_str(&e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn catalogs() -> (String, String, String) {
        let lots = json!([
            { "id": 1, "lot_no": "WCL-004", "waste_master_id": 7, "active": true },
            { "id": 2, "lot_no": "WCL-003", "waste_master_id": 7, "active": false }
        ]);
        let masters = json!([
            {
                "id": 7, "code": 1007, "department": "COMBING", "waste": "COMBER NOILS",
                "packing_type_id": 3, "waste_kg": "4200", "hsn_code": null
            },
            {
                "id": 8, "code": 1008, "department": "CARDING", "waste": "FLAT STRIPS",
                "packing_type_id": 3, "waste_kg": "900", "hsn_code": null
            }
        ]);
        let packing_types = json!([
            { "id": 3, "code": 103, "name": "HDPE BALE", "tare_weight": "2.5", "rate": "12" }
        ]);
        (lots.to_string(), masters.to_string(), packing_types.to_string())
    }

    #[test]
    fn test_resolve_lot_context() {
        let (lots, masters, packing_types) = catalogs();

        let context: Value =
            serde_json::from_str(&resolve("WCL-004", &lots, &masters, &packing_types).unwrap())
                .unwrap();
        assert_eq!(context["waste_master"]["waste"], "COMBER NOILS");
        assert_eq!(context["snapshot"]["tare_weight"], "2.5");

        let inactive = resolve("WCL-003", &lots, &masters, &packing_types);
        assert!(inactive.unwrap_err().contains("inactive"));
    }

    #[test]
    fn test_available_masters_excludes_rated() {
        let (_, masters, _) = catalogs();
        let rates = json!([
            { "id": 1, "waste_master_id": 7, "rate_date": "2024-01-01", "rate": "42.5", "remarks": null }
        ])
        .to_string();

        let result: Value =
            serde_json::from_str(&available("2024-01-01", &masters, &rates, "").unwrap()).unwrap();
        assert_eq!(result.as_array().map(Vec::len), Some(1));
        assert_eq!(result[0]["id"], 8);
    }

    #[test]
    fn test_generate_then_reconcile() {
        let bales = generate_json(250.0, 10, 2.5, "WB", "2024-01-04", "WCL-004").unwrap();
        let parsed: Vec<Bale> = serde_json::from_str(&bales).unwrap();
        assert_eq!(parsed.len(), 10);
        assert_eq!(parsed[0].bale_no, "WB240104001");

        assert!(reconcile_json(&bales, 250.0, 10).is_ok());

        let mut edited = parsed;
        edited[0].gross_weight = Decimal::from(30);
        let edited = serde_json::to_string(&edited).unwrap();
        let err = reconcile_json(&edited, 250.0, 10).unwrap_err();
        assert!(err.contains("difference 5"));
    }

    #[test]
    fn test_generate_rejects_zero_bales() {
        assert!(generate_json(250.0, 0, 2.5, "WB", "2024-01-04", "WCL-004").is_err());
        assert!(generate_json(250.0, 10, 2.5, "WB", "04/01/2024", "WCL-004").is_err());
    }

    #[test]
    fn test_net_weight() {
        assert!((calculate_net_weight(25.0, 2.5) - 22.5).abs() < 1e-9);
    }

    #[test]
    fn test_line_values() {
        assert_eq!(line_value_of(100.0, 50.0, 100).unwrap(), Decimal::new(5000, 2));
        assert_eq!(line_value_of(1000.0, 200.0, 1000).unwrap(), Decimal::new(20000, 2));
        assert!(line_value_of(1.0, 1.0, 10).is_err());
    }

    #[test]
    fn test_invoice_totals() {
        let totals: InvoiceTotals =
            serde_json::from_str(&invoice_totals_json(Some(1000.0), 0.0, 0.0, 1, 5.0).unwrap())
                .unwrap();
        assert_eq!(totals.invoice_value, Decimal::new(105000, 2));

        let from_weight: InvoiceTotals =
            serde_json::from_str(&invoice_totals_json(None, 1000.0, 200.0, 1000, 5.0).unwrap())
                .unwrap();
        assert_eq!(from_weight.assessable_value, Decimal::new(20000, 2));
        assert!(invoice_totals_json(None, 1.0, 1.0, 10, 5.0).is_err());
    }
}
