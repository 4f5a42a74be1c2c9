//! Sales order service

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::models::{SalesOrder, SalesOrderLine};
use shared::{validate_sales_order, RatePer, ValidationError};
use validator::Validate;

use crate::error::AppResult;
use crate::repository::{require, Store};

/// Sales order service; line values and the order total are always derived
#[derive(Clone)]
pub struct SalesOrderService {
    store: Store,
}

/// One line as entered; `value` is never accepted from the client
#[derive(Debug, Clone, Deserialize)]
pub struct SalesOrderLineInput {
    pub waste_master_id: i64,
    #[serde(default)]
    pub qty: u32,
    pub total_wt: Decimal,
    pub rate: Decimal,
    #[serde(default)]
    pub rate_per: RatePer,
}

impl From<SalesOrderLineInput> for SalesOrderLine {
    fn from(input: SalesOrderLineInput) -> Self {
        Self {
            waste_master_id: input.waste_master_id,
            qty: input.qty,
            total_wt: input.total_wt,
            rate: input.rate,
            rate_per: input.rate_per,
            value: Decimal::ZERO,
        }
    }
}

/// Input for creating a sales order
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSalesOrderInput {
    #[validate(length(min = 1, max = 50, message = "Order number must be 1-50 characters"))]
    pub order_no: String,
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "Party cannot be empty"))]
    pub party: String,
    pub lines: Vec<SalesOrderLineInput>,
}

/// Input for updating a sales order; `lines` replaces every line when present
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSalesOrderInput {
    pub order_no: Option<String>,
    pub date: Option<NaiveDate>,
    pub party: Option<String>,
    pub lines: Option<Vec<SalesOrderLineInput>>,
}

impl SalesOrderService {
    /// Create a new SalesOrderService instance
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> AppResult<Vec<SalesOrder>> {
        self.store.sales_orders.get_all().await
    }

    pub async fn get(&self, id: i64) -> AppResult<SalesOrder> {
        require(&*self.store.sales_orders, id).await
    }

    async fn ensure_masters_exist(&self, order: &SalesOrder) -> AppResult<()> {
        let masters = self.store.waste_masters.get_all().await?;
        for line in &order.lines {
            if !masters.iter().any(|m| m.id == line.waste_master_id) {
                return Err(ValidationError::MissingReference {
                    kind: "waste master",
                    id: line.waste_master_id,
                }
                .into());
            }
        }
        Ok(())
    }

    pub async fn create(&self, input: CreateSalesOrderInput) -> AppResult<SalesOrder> {
        input.validate()?;

        let mut order = SalesOrder {
            id: 0,
            order_no: input.order_no.trim().to_string(),
            date: input.date,
            party: input.party.trim().to_string(),
            lines: input.lines.into_iter().map(SalesOrderLine::from).collect(),
            total_value: Decimal::ZERO,
        };
        validate_sales_order(&order)?;
        self.ensure_masters_exist(&order).await?;
        order.recompute();

        let created = self.store.sales_orders.create(order).await?;
        tracing::info!(
            id = created.id,
            order_no = %created.order_no,
            total_value = %created.total_value,
            "Sales order created"
        );
        Ok(created)
    }

    pub async fn update(&self, id: i64, input: UpdateSalesOrderInput) -> AppResult<SalesOrder> {
        let mut order = self.get(id).await?;

        if let Some(order_no) = input.order_no {
            order.order_no = order_no.trim().to_string();
        }
        if let Some(date) = input.date {
            order.date = date;
        }
        if let Some(party) = input.party {
            order.party = party.trim().to_string();
        }
        if let Some(lines) = input.lines {
            order.lines = lines.into_iter().map(SalesOrderLine::from).collect();
        }
        validate_sales_order(&order)?;
        self.ensure_masters_exist(&order).await?;
        order.recompute();

        self.store.sales_orders.update(id, order).await
    }

    /// Delete an order no invoice was raised against
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.get(id).await?;

        let invoices = self.store.invoices.get_all().await?;
        if invoices.iter().any(|i| i.sales_order_id == Some(id)) {
            return Err(ValidationError::InUse {
                kind: "sales order",
                id,
                dependent: "invoice",
            }
            .into());
        }

        self.store.sales_orders.delete(id).await
    }
}
