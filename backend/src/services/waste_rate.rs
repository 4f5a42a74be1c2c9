//! Waste rate quotation service
//!
//! The (waste master, rate date) pair is unique. The availability query keeps
//! the picker from offering a quoted master; `create` and `update` enforce the
//! pair on their own.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::availability::{available_for_date, ensure_rate_unique, search_masters};
use shared::models::{WasteMaster, WasteRate};
use shared::{validate_waste_rate, ValidationError};

use crate::error::AppResult;
use crate::repository::{require, Store};

/// Waste rate service for managing dated rate quotations
#[derive(Clone)]
pub struct WasteRateService {
    store: Store,
}

/// Input for creating a waste rate
#[derive(Debug, Deserialize)]
pub struct CreateWasteRateInput {
    pub waste_master_id: i64,
    pub rate_date: NaiveDate,
    pub rate: Decimal,
    pub remarks: Option<String>,
}

/// Input for updating a waste rate
#[derive(Debug, Default, Deserialize)]
pub struct UpdateWasteRateInput {
    pub waste_master_id: Option<i64>,
    pub rate_date: Option<NaiveDate>,
    pub rate: Option<Decimal>,
    pub remarks: Option<String>,
}

/// Query for masters that can still be quoted
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    pub date: NaiveDate,
    pub q: Option<String>,
}

impl WasteRateService {
    /// Create a new WasteRateService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<WasteRate>> {
        self.store.waste_rates.get_all().await
    }

    pub async fn get(&self, id: i64) -> AppResult<WasteRate> {
        require(&*self.store.waste_rates, id).await
    }

    /// Waste masters without a rate on `query.date`, narrowed by `query.q`
    pub async fn available(&self, query: &AvailabilityQuery) -> AppResult<Vec<WasteMaster>> {
        let masters = self.store.waste_masters.get_all().await?;
        let rates = self.store.waste_rates.get_all().await?;

        let available = available_for_date(query.date, &masters, &rates);
        let narrowed = match query.q.as_deref() {
            Some(q) => search_masters(available, q),
            None => available,
        };
        Ok(narrowed.into_iter().cloned().collect())
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

    async fn ensure_unique(&self, rate: &WasteRate, exclude_id: Option<i64>) -> AppResult<()> {
        let rates = self.store.waste_rates.get_all().await?;
        if let Err(err) = ensure_rate_unique(rate.waste_master_id, rate.rate_date, &rates, exclude_id)
        {
            tracing::warn!(
                waste_master_id = rate.waste_master_id,
                rate_date = %rate.rate_date,
                "Duplicate waste rate rejected"
            );
            return Err(err.into());
        }
        Ok(())
    }

    /// Quote a rate for a waste master on a date
    pub async fn create(&self, input: CreateWasteRateInput) -> AppResult<WasteRate> {
        let rate = WasteRate {
            id: 0,
            waste_master_id: input.waste_master_id,
            rate_date: input.rate_date,
            rate: input.rate,
            remarks: input.remarks.filter(|r| !r.trim().is_empty()),
        };
        validate_waste_rate(&rate)?;
        self.ensure_master_exists(rate.waste_master_id).await?;
        self.ensure_unique(&rate, None).await?;

        let created = self.store.waste_rates.create(rate).await?;
        tracing::info!(
            id = created.id,
            waste_master_id = created.waste_master_id,
            rate_date = %created.rate_date,
            "Waste rate created"
        );
        Ok(created)
    }

    pub async fn update(&self, id: i64, input: UpdateWasteRateInput) -> AppResult<WasteRate> {
        let mut rate = self.get(id).await?;

        if let Some(waste_master_id) = input.waste_master_id {
            self.ensure_master_exists(waste_master_id).await?;
            rate.waste_master_id = waste_master_id;
        }
        if let Some(rate_date) = input.rate_date {
            rate.rate_date = rate_date;
        }
        if let Some(value) = input.rate {
            rate.rate = value;
        }
        if let Some(remarks) = input.remarks {
            rate.remarks = Some(remarks).filter(|r| !r.trim().is_empty());
        }
        validate_waste_rate(&rate)?;
        self.ensure_unique(&rate, Some(id)).await?;

        self.store.waste_rates.update(id, rate).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.store.waste_rates.delete(id).await
    }
}
