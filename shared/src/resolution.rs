//! Lot -> waste master -> packing type resolution

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LookupError;
use crate::models::{PackingType, WasteLot, WasteMaster};

/// Everything a packing run needs to know about a lot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackingContext {
    pub lot: WasteLot,
    pub waste_master: WasteMaster,
    pub packing_type: PackingType,
    pub snapshot: PackingSnapshot,
}

/// Values captured at resolution time and frozen into the packing record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PackingSnapshot {
    pub tare_weight: Decimal,
    pub rate: Decimal,
    /// Stock on hand for the waste product (kg)
    pub stock: Decimal,
}

impl PackingContext {
    pub fn new(lot: WasteLot, waste_master: WasteMaster, packing_type: PackingType) -> Self {
        let snapshot = PackingSnapshot {
            tare_weight: packing_type.tare_weight,
            rate: packing_type.rate,
            stock: waste_master.waste_kg,
        };
        Self {
            lot,
            waste_master,
            packing_type,
            snapshot,
        }
    }
}

/// First step of the chain: the active lot with exactly this number
pub fn find_active_lot<'a>(lot_no: &str, lots: &'a [WasteLot]) -> Result<&'a WasteLot, LookupError> {
    let lot_no = lot_no.trim();
    let mut inactive = false;

    for lot in lots.iter().filter(|l| l.lot_no.trim() == lot_no) {
        if lot.active {
            return Ok(lot);
        }
        inactive = true;
    }

    if inactive {
        Err(LookupError::LotInactive(lot_no.to_string()))
    } else {
        Err(LookupError::LotNotFound(lot_no.to_string()))
    }
}

/// Second step: the waste master the lot points at
pub fn find_waste_master<'a>(
    lot: &WasteLot,
    masters: &'a [WasteMaster],
) -> Result<&'a WasteMaster, LookupError> {
    masters
        .iter()
        .find(|m| m.id == lot.waste_master_id)
        .ok_or_else(|| LookupError::WasteMasterMissing {
            lot_no: lot.lot_no.clone(),
            waste_master_id: lot.waste_master_id,
        })
}

/// Third step: the packing type the waste master points at
pub fn find_packing_type<'a>(
    master: &WasteMaster,
    packing_types: &'a [PackingType],
) -> Result<&'a PackingType, LookupError> {
    packing_types
        .iter()
        .find(|p| p.id == master.packing_type_id)
        .ok_or(LookupError::PackingTypeMissing {
            waste_master_id: master.id,
            packing_type_id: master.packing_type_id,
        })
}

/// Resolve a lot number against in-memory catalogs, stopping at the first broken link
pub fn resolve_lot(
    lot_no: &str,
    lots: &[WasteLot],
    masters: &[WasteMaster],
    packing_types: &[PackingType],
) -> Result<PackingContext, LookupError> {
    let lot = find_active_lot(lot_no, lots)?;
    let master = find_waste_master(lot, masters)?;
    let packing_type = find_packing_type(master, packing_types)?;

    Ok(PackingContext::new(
        lot.clone(),
        master.clone(),
        packing_type.clone(),
    ))
}
