//! Waste packing service: bale generation, reconciliation and persistence
//!
//! Generation only builds a draft and never writes. Saving re-resolves the lot,
//! recomputes every net weight and reconciles the bales against the declared
//! total before a single `create` call.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::bale::{
    check_bale_count, generate, reconcile, refresh_net_weights, BaleNumbering, PackingDraftInput,
    Reconciliation,
};
use shared::models::{Bale, RecordStatus, WastePacking};
use shared::resolution::PackingContext;
use shared::{require_non_negative, ValidationError};

use crate::error::AppResult;
use crate::repository::{require, Store};
use crate::services::ResolutionService;

const KIND: &str = "waste packing";

/// Packing service for generating and saving bale lists
#[derive(Clone)]
pub struct PackingService {
    store: Store,
    resolution: ResolutionService,
    bale_prefix: String,
}

/// Input for generating a draft packing
#[derive(Debug, Deserialize)]
pub struct GeneratePackingInput {
    pub lot_no: String,
    pub date: NaiveDate,
    pub total_weight: Option<Decimal>,
    pub no_of_bales: Option<i64>,
    /// Defaults to the packing type's tare weight
    pub tare_weight: Option<Decimal>,
}

/// A generated, unsaved packing with the context it was built from
#[derive(Debug, Clone, Serialize)]
pub struct PackingDraft {
    pub packing: WastePacking,
    pub context: PackingContext,
    pub reconciliation: Reconciliation,
}

/// Input for saving a packing
#[derive(Debug, Deserialize)]
pub struct CreatePackingInput {
    pub lot_no: String,
    pub date: NaiveDate,
    pub total_weight: Decimal,
    pub no_of_bales: i64,
    /// Snapshot captured when the draft was generated; resolved again if absent
    pub tare_weight: Option<Decimal>,
    pub rate: Option<Decimal>,
    pub details: Vec<Bale>,
}

/// Input for updating a saved packing
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePackingInput {
    pub date: Option<NaiveDate>,
    pub total_weight: Option<Decimal>,
    pub no_of_bales: Option<i64>,
    pub details: Option<Vec<Bale>>,
}

fn bale_count(no_of_bales: i64) -> Result<u32, ValidationError> {
    check_bale_count(no_of_bales, "no_of_bales")
}

/// Recompute net weights and check the bales against the declared total
fn reconcile_packing(packing: &mut WastePacking) -> Result<Reconciliation, ValidationError> {
    if packing.total_weight <= Decimal::ZERO {
        return Err(ValidationError::NotPositive {
            field: "total_weight",
        });
    }
    refresh_net_weights(&mut packing.details);
    reconcile(&packing.details, packing.total_weight, packing.no_of_bales)
}

impl PackingService {
    /// Create a new PackingService instance
    pub fn new(store: Store, bale_prefix: impl Into<String>) -> Self {
        Self {
            resolution: ResolutionService::new(store.clone()),
            store,
            bale_prefix: bale_prefix.into(),
        }
    }

    pub async fn list(&self) -> AppResult<Vec<WastePacking>> {
        self.store.packings.get_all().await
    }

    pub async fn get(&self, id: i64) -> AppResult<WastePacking> {
        require(&*self.store.packings, id).await
    }

    /// Resolve the lot and split the total weight into bales without saving
    pub async fn generate(&self, input: GeneratePackingInput) -> AppResult<PackingDraft> {
        let context = self.resolution.resolve(&input.lot_no).await?;

        let draft = PackingDraftInput {
            total_weight: input.total_weight,
            bale_count: input.no_of_bales,
            tare_weight: Some(input.tare_weight.unwrap_or(context.snapshot.tare_weight)),
        };
        let generation = draft.to_generation_input()?;

        let numbering = BaleNumbering::new(self.bale_prefix.clone(), input.date, &context.lot.lot_no);
        let details = generate(&generation, &numbering)?;

        let mut packing = WastePacking {
            id: 0,
            lot_id: context.lot.id,
            lot_no: context.lot.lot_no.clone(),
            date: input.date,
            total_weight: generation.total_weight,
            no_of_bales: bale_count(generation.bale_count)?,
            tare_weight: generation.tare_weight,
            rate: context.snapshot.rate,
            status: RecordStatus::Draft,
            details,
        };
        let reconciliation = reconcile_packing(&mut packing)?;

        tracing::debug!(
            lot_no = %packing.lot_no,
            bales = packing.no_of_bales,
            "Packing draft generated"
        );
        Ok(PackingDraft {
            packing,
            context,
            reconciliation,
        })
    }

    /// Save a (possibly hand-edited) draft
    pub async fn create(&self, input: CreatePackingInput) -> AppResult<WastePacking> {
        let context = self.resolution.resolve(&input.lot_no).await?;

        let mut packing = WastePacking {
            id: 0,
            lot_id: context.lot.id,
            lot_no: context.lot.lot_no.clone(),
            date: input.date,
            total_weight: input.total_weight,
            no_of_bales: bale_count(input.no_of_bales)?,
            tare_weight: input.tare_weight.unwrap_or(context.snapshot.tare_weight),
            rate: input.rate.unwrap_or(context.snapshot.rate),
            status: RecordStatus::Draft,
            details: input.details,
        };
        require_non_negative(packing.tare_weight, "tare_weight")?;
        require_non_negative(packing.rate, "rate")?;

        if let Err(err) = reconcile_packing(&mut packing) {
            tracing::warn!(lot_no = %packing.lot_no, error = %err, "Packing rejected");
            return Err(err.into());
        }
        packing.status = packing.status.transition(RecordStatus::Saved)?;

        let created = self.store.packings.create(packing).await?;
        tracing::info!(
            id = created.id,
            lot_no = %created.lot_no,
            bales = created.no_of_bales,
            total_weight = %created.total_weight,
            "Packing saved"
        );
        Ok(created)
    }

    /// Edit a saved packing; snapshots and lot stay as captured
    pub async fn update(&self, id: i64, input: UpdatePackingInput) -> AppResult<WastePacking> {
        let mut packing = self.get(id).await?;
        if packing.status.is_locked() {
            return Err(ValidationError::Locked { kind: KIND, id }.into());
        }

        if let Some(date) = input.date {
            packing.date = date;
        }
        if let Some(total_weight) = input.total_weight {
            packing.total_weight = total_weight;
        }
        if let Some(no_of_bales) = input.no_of_bales {
            packing.no_of_bales = bale_count(no_of_bales)?;
        }
        if let Some(details) = input.details {
            packing.details = details;
        }

        if let Err(err) = reconcile_packing(&mut packing) {
            tracing::warn!(id, error = %err, "Packing update rejected");
            return Err(err.into());
        }

        self.store.packings.update(id, packing).await
    }

    /// Lock a saved packing against further edits
    pub async fn approve(&self, id: i64) -> AppResult<WastePacking> {
        let mut packing = self.get(id).await?;
        packing.status = packing.status.transition(RecordStatus::Approved)?;

        let approved = self.store.packings.update(id, packing).await?;
        tracing::info!(id, "Packing approved");
        Ok(approved)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let packing = self.get(id).await?;
        if packing.status.is_locked() {
            return Err(ValidationError::Locked { kind: KIND, id }.into());
        }

        let invoices = self.store.invoices.get_all().await?;
        if invoices.iter().any(|i| i.packing_ids.contains(&id)) {
            return Err(ValidationError::InUse {
                kind: KIND,
                id,
                dependent: "invoice",
            }
            .into());
        }

        self.store.packings.delete(id).await
    }
}
