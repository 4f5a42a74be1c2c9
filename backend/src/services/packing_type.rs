//! Packing type catalog service

use rust_decimal::Decimal;
use serde::Deserialize;
use shared::models::PackingType;
use shared::{ensure_code_unchanged, ensure_code_unique, validate_packing_type, ValidationError};
use validator::Validate;

use crate::error::AppResult;
use crate::repository::{require, Store};

const KIND: &str = "packing type";

/// Packing type service for managing packing types and their tare weights
#[derive(Clone)]
pub struct PackingTypeService {
    store: Store,
}

/// Input for creating a packing type
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePackingTypeInput {
    pub code: i64,
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
    pub tare_weight: Decimal,
    pub rate: Decimal,
}

/// Input for updating a packing type
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePackingTypeInput {
    pub code: Option<i64>,
    pub name: Option<String>,
    pub tare_weight: Option<Decimal>,
    pub rate: Option<Decimal>,
}

impl PackingTypeService {
    /// Create a new PackingTypeService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<PackingType>> {
        self.store.packing_types.get_all().await
    }

    pub async fn get(&self, id: i64) -> AppResult<PackingType> {
        require(&*self.store.packing_types, id).await
    }

    /// Create a packing type with a unique code
    pub async fn create(&self, input: CreatePackingTypeInput) -> AppResult<PackingType> {
        input.validate()?;

        let packing_type = PackingType {
            id: 0,
            code: input.code,
            name: input.name.trim().to_string(),
            tare_weight: input.tare_weight,
            rate: input.rate,
        };
        validate_packing_type(&packing_type)?;

        let existing = self.store.packing_types.get_all().await?;
        ensure_code_unique(KIND, packing_type.code, &existing, |p| (p.id, p.code), None)?;

        let created = self.store.packing_types.create(packing_type).await?;
        tracing::info!(id = created.id, code = created.code, "Packing type created");
        Ok(created)
    }

    /// Update a packing type; the code cannot change
    ///
    /// Packings already saved keep the tare and rate they captured.
    pub async fn update(&self, id: i64, input: UpdatePackingTypeInput) -> AppResult<PackingType> {
        let mut packing_type = self.get(id).await?;
        ensure_code_unchanged(KIND, packing_type.code, input.code)?;

        if let Some(name) = input.name {
            packing_type.name = name.trim().to_string();
        }
        if let Some(tare_weight) = input.tare_weight {
            packing_type.tare_weight = tare_weight;
        }
        if let Some(rate) = input.rate {
            packing_type.rate = rate;
        }
        validate_packing_type(&packing_type)?;

        self.store.packing_types.update(id, packing_type).await
    }

    /// Delete a packing type no waste master uses
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.get(id).await?;

        let masters = self.store.waste_masters.get_all().await?;
        if masters.iter().any(|m| m.packing_type_id == id) {
            tracing::warn!(id, "Packing type still in use");
            return Err(ValidationError::InUse {
                kind: KIND,
                id,
                dependent: "waste master",
            }
            .into());
        }

        self.store.packing_types.delete(id).await
    }
}
