//! Lot resolution over the gateway
//!
//! Lot -> waste master -> packing type, one call per step, stopping at the
//! first broken link.

use shared::resolution::{find_active_lot, PackingContext};
use shared::LookupError;

use crate::error::AppResult;
use crate::repository::Store;

#[derive(Clone)]
pub struct ResolutionService {
    store: Store,
}

impl ResolutionService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, lot_no: &str) -> AppResult<PackingContext> {
        let lots = self.store.waste_lots.get_all().await?;
        let lot = find_active_lot(lot_no, &lots)?.clone();

        let master = self
            .store
            .waste_masters
            .get_by_id(lot.waste_master_id)
            .await?
            .ok_or_else(|| LookupError::WasteMasterMissing {
                lot_no: lot.lot_no.clone(),
                waste_master_id: lot.waste_master_id,
            })?;

        let packing_type = self
            .store
            .packing_types
            .get_by_id(master.packing_type_id)
            .await?
            .ok_or(LookupError::PackingTypeMissing {
                waste_master_id: master.id,
                packing_type_id: master.packing_type_id,
            })?;

        tracing::debug!(lot_no = %lot.lot_no, waste = %master.waste, "Lot resolved");
        Ok(PackingContext::new(lot, master, packing_type))
    }
}
