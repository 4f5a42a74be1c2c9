//! Waste lot service

use serde::Deserialize;
use shared::models::WasteLot;
use shared::{ensure_lot_no_unique, validate_waste_lot, ValidationError};
use validator::Validate;

use crate::error::AppResult;
use crate::repository::{require, Store};

/// Waste lot service for managing lot numbers and their waste type
#[derive(Clone)]
pub struct WasteLotService {
    store: Store,
}

fn default_active() -> bool {
    true
}

/// Input for creating a waste lot
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWasteLotInput {
    #[validate(length(min = 1, message = "Lot number cannot be empty"))]
    pub lot_no: String,
    pub waste_master_id: i64,
    #[serde(default = "default_active")]
    pub active: bool,
}

/// Input for updating a waste lot
#[derive(Debug, Default, Deserialize)]
pub struct UpdateWasteLotInput {
    pub lot_no: Option<String>,
    pub waste_master_id: Option<i64>,
    pub active: Option<bool>,
}

impl WasteLotService {
    /// Create a new WasteLotService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<WasteLot>> {
        self.store.waste_lots.get_all().await
    }

    pub async fn get(&self, id: i64) -> AppResult<WasteLot> {
        require(&*self.store.waste_lots, id).await
    }

    async fn ensure_master_exists(&self, waste_master_id: i64) -> AppResult<()> {
        if self
            .store
            .waste_masters
            .get_by_id(waste_master_id)
            .await?
            .is_none()
        {
            return Err(ValidationError::MissingReference {
                kind: "waste master",
                id: waste_master_id,
            }
            .into());
        }
        Ok(())
    }

    /// Create a lot with a lot number unique regardless of case
    pub async fn create(&self, input: CreateWasteLotInput) -> AppResult<WasteLot> {
        input.validate()?;

        let lot = WasteLot {
            id: 0,
            lot_no: input.lot_no.trim().to_string(),
            waste_master_id: input.waste_master_id,
            active: input.active,
        };
        validate_waste_lot(&lot)?;
        self.ensure_master_exists(lot.waste_master_id).await?;

        let existing = self.store.waste_lots.get_all().await?;
        if let Err(err) = ensure_lot_no_unique(&lot.lot_no, &existing, None) {
            tracing::warn!(lot_no = %lot.lot_no, "Duplicate lot number rejected");
            return Err(err.into());
        }

        let created = self.store.waste_lots.create(lot).await?;
        tracing::info!(id = created.id, lot_no = %created.lot_no, "Waste lot created");
        Ok(created)
    }

    pub async fn update(&self, id: i64, input: UpdateWasteLotInput) -> AppResult<WasteLot> {
        let mut lot = self.get(id).await?;

        if let Some(lot_no) = input.lot_no {
            let lot_no = lot_no.trim().to_string();
            let existing = self.store.waste_lots.get_all().await?;
            ensure_lot_no_unique(&lot_no, &existing, Some(id))?;
            lot.lot_no = lot_no;
        }
        if let Some(waste_master_id) = input.waste_master_id {
            self.ensure_master_exists(waste_master_id).await?;
            lot.waste_master_id = waste_master_id;
        }
        if let Some(active) = input.active {
            lot.active = active;
        }
        validate_waste_lot(&lot)?;

        self.store.waste_lots.update(id, lot).await
    }

    /// Delete a lot that has never been packed
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.get(id).await?;

        let packings = self.store.packings.get_all().await?;
        if packings.iter().any(|p| p.lot_id == id) {
            return Err(ValidationError::InUse {
                kind: "waste lot",
                id,
                dependent: "waste packing",
            }
            .into());
        }

        self.store.waste_lots.delete(id).await
    }
}
