//! Waste master catalog service

use rust_decimal::Decimal;
use serde::Deserialize;
use shared::models::WasteMaster;
use shared::{ensure_code_unchanged, ensure_code_unique, validate_waste_master, ValidationError};
use validator::Validate;

use crate::error::AppResult;
use crate::repository::{require, Store};

const KIND: &str = "waste master";

/// Waste master service for managing waste product definitions
#[derive(Clone)]
pub struct WasteMasterService {
    store: Store,
}

/// Input for creating a waste master
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWasteMasterInput {
    pub code: i64,
    #[validate(length(min = 1, message = "Department cannot be empty"))]
    pub department: String,
    #[validate(length(min = 1, message = "Waste name cannot be empty"))]
    pub waste: String,
    pub packing_type_id: i64,
    #[serde(default)]
    pub waste_kg: Decimal,
    pub hsn_code: Option<String>,
    #[serde(default)]
    pub packing_pre_weightment: bool,
}

/// Input for updating a waste master
#[derive(Debug, Default, Deserialize)]
pub struct UpdateWasteMasterInput {
    pub code: Option<i64>,
    pub department: Option<String>,
    pub waste: Option<String>,
    pub packing_type_id: Option<i64>,
    pub waste_kg: Option<Decimal>,
    pub hsn_code: Option<String>,
    pub packing_pre_weightment: Option<bool>,
}

impl WasteMasterService {
    /// Create a new WasteMasterService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<WasteMaster>> {
        self.store.waste_masters.get_all().await
    }

    pub async fn get(&self, id: i64) -> AppResult<WasteMaster> {
        require(&*self.store.waste_masters, id).await
    }

    async fn ensure_packing_type_exists(&self, packing_type_id: i64) -> AppResult<()> {
        if self
            .store
            .packing_types
            .get_by_id(packing_type_id)
            .await?
            .is_none()
        {
            return Err(ValidationError::MissingReference {
                kind: "packing type",
                id: packing_type_id,
            }
            .into());
        }
        Ok(())
    }

    /// Create a waste master pointing at an existing packing type
    pub async fn create(&self, input: CreateWasteMasterInput) -> AppResult<WasteMaster> {
        input.validate()?;

        let master = WasteMaster {
            id: 0,
            code: input.code,
            department: input.department.trim().to_string(),
            waste: input.waste.trim().to_string(),
            packing_type_id: input.packing_type_id,
            waste_kg: input.waste_kg,
            hsn_code: input.hsn_code.filter(|h| !h.trim().is_empty()),
            packing_pre_weightment: input.packing_pre_weightment,
        };
        validate_waste_master(&master)?;
        self.ensure_packing_type_exists(master.packing_type_id).await?;

        let existing = self.store.waste_masters.get_all().await?;
        ensure_code_unique(KIND, master.code, &existing, |m| (m.id, m.code), None)?;

        let created = self.store.waste_masters.create(master).await?;
        tracing::info!(id = created.id, code = created.code, waste = %created.waste, "Waste master created");
        Ok(created)
    }

    /// Update a waste master; the code cannot change
    pub async fn update(&self, id: i64, input: UpdateWasteMasterInput) -> AppResult<WasteMaster> {
        let mut master = self.get(id).await?;
        ensure_code_unchanged(KIND, master.code, input.code)?;

        if let Some(department) = input.department {
            master.department = department.trim().to_string();
        }
        if let Some(waste) = input.waste {
            master.waste = waste.trim().to_string();
        }
        if let Some(packing_type_id) = input.packing_type_id {
            self.ensure_packing_type_exists(packing_type_id).await?;
            master.packing_type_id = packing_type_id;
        }
        if let Some(waste_kg) = input.waste_kg {
            master.waste_kg = waste_kg;
        }
        if let Some(hsn_code) = input.hsn_code {
            master.hsn_code = Some(hsn_code).filter(|h| !h.trim().is_empty());
        }
        if let Some(pre_weightment) = input.packing_pre_weightment {
            master.packing_pre_weightment = pre_weightment;
        }
        validate_waste_master(&master)?;

        self.store.waste_masters.update(id, master).await
    }

    /// Delete a waste master with no lots or rates
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.get(id).await?;

        let lots = self.store.waste_lots.get_all().await?;
        if lots.iter().any(|l| l.waste_master_id == id) {
            return Err(ValidationError::InUse {
                kind: KIND,
                id,
                dependent: "waste lot",
            }
            .into());
        }

        let rates = self.store.waste_rates.get_all().await?;
        if rates.iter().any(|r| r.waste_master_id == id) {
            return Err(ValidationError::InUse {
                kind: KIND,
                id,
                dependent: "waste rate",
            }
            .into());
        }

        self.store.waste_masters.delete(id).await
    }
}
