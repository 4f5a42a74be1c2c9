//! Seed data shared by the backend integration tests

#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use cwb_backend::repository::MemoryRepository;
use cwb_backend::Store;
use rust_decimal::Decimal;
use shared::models::{PackingType, WasteLot, WasteMaster};

pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn bale_press() -> PackingType {
    PackingType {
        id: 3,
        code: 103,
        name: "HDPE BALE".to_string(),
        tare_weight: dec("2.5"),
        rate: dec("12"),
    }
}

pub fn comber_noils() -> WasteMaster {
    WasteMaster {
        id: 7,
        code: 1007,
        department: "COMBING".to_string(),
        waste: "COMBER NOILS".to_string(),
        packing_type_id: 3,
        waste_kg: dec("4200"),
        hsn_code: Some("52021000".to_string()),
        packing_pre_weightment: false,
    }
}

pub fn flat_strips() -> WasteMaster {
    WasteMaster {
        id: 8,
        code: 1008,
        department: "CARDING".to_string(),
        waste: "FLAT STRIPS".to_string(),
        packing_type_id: 3,
        waste_kg: dec("900"),
        hsn_code: None,
        packing_pre_weightment: false,
    }
}

pub fn lot(id: i64, lot_no: &str, waste_master_id: i64, active: bool) -> WasteLot {
    WasteLot {
        id,
        lot_no: lot_no.to_string(),
        waste_master_id,
        active,
    }
}

/// Packing type 3, masters 7 and 8, active lot WCL-004 and inactive lot WCL-003
pub fn seeded_store() -> Store {
    Store {
        packing_types: Arc::new(MemoryRepository::with_records(vec![bale_press()])),
        waste_masters: Arc::new(MemoryRepository::with_records(vec![
            comber_noils(),
            flat_strips(),
        ])),
        waste_lots: Arc::new(MemoryRepository::with_records(vec![
            lot(1, "WCL-004", 7, true),
            lot(2, "WCL-003", 7, false),
        ])),
        ..Store::in_memory()
    }
}
