//! Invoice service
//!
//! An invoice either carries a keyed-in assessable value (`rate` is `None`) or
//! prices the net weight of its packings at `rate` / `rate_per`. Totals are
//! recomputed from that basis on every write.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::models::{Invoice, RecordStatus};
use shared::valuation::{AssessableBasis, InvoiceTotals};
use shared::{require_text, RatePer, ValidationError};
use validator::Validate;

use crate::error::AppResult;
use crate::repository::{require, Store};

const KIND: &str = "invoice";

/// Invoice service for raising and approving tax invoices
#[derive(Clone)]
pub struct InvoiceService {
    store: Store,
    default_gst_percent: Decimal,
}

/// Input for raising an invoice
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInvoiceInput {
    #[validate(length(min = 1, max = 50, message = "Invoice number must be 1-50 characters"))]
    pub invoice_no: String,
    pub date: NaiveDate,
    #[validate(length(min = 1, message = "Party cannot be empty"))]
    pub party: String,
    pub sales_order_id: Option<i64>,
    #[serde(default)]
    pub packing_ids: Vec<i64>,
    /// Takes precedence over `rate` when both are given
    pub assessable_value: Option<Decimal>,
    pub rate: Option<Decimal>,
    #[serde(default)]
    pub rate_per: RatePer,
    pub gst_percent: Option<Decimal>,
}

/// Input for updating an invoice
#[derive(Debug, Default, Deserialize)]
pub struct UpdateInvoiceInput {
    pub invoice_no: Option<String>,
    pub date: Option<NaiveDate>,
    pub party: Option<String>,
    pub sales_order_id: Option<i64>,
    pub packing_ids: Option<Vec<i64>>,
    pub assessable_value: Option<Decimal>,
    pub rate: Option<Decimal>,
    pub rate_per: Option<RatePer>,
    pub gst_percent: Option<Decimal>,
}

impl InvoiceService {
    /// Create a new InvoiceService instance
    pub fn new(store: Store, default_gst_percent: Decimal) -> Self {
        Self {
            store,
            default_gst_percent,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Invoice>> {
        self.store.invoices.get_all().await
    }

    pub async fn get(&self, id: i64) -> AppResult<Invoice> {
        require(&*self.store.invoices, id).await
    }

    async fn ensure_references(&self, invoice: &Invoice) -> AppResult<()> {
        if let Some(order_id) = invoice.sales_order_id {
            if self.store.sales_orders.get_by_id(order_id).await?.is_none() {
                return Err(ValidationError::MissingReference {
                    kind: "sales order",
                    id: order_id,
                }
                .into());
            }
        }
        for &id in &invoice.packing_ids {
            if self.store.packings.get_by_id(id).await?.is_none() {
                return Err(ValidationError::MissingReference {
                    kind: "waste packing",
                    id,
                }
                .into());
            }
        }
        Ok(())
    }

    /// Total net weight of the dispatched packings
    async fn dispatched_net_weight(&self, packing_ids: &[i64]) -> AppResult<Decimal> {
        if packing_ids.is_empty() {
            return Err(ValidationError::MissingField {
                field: "packing_ids",
            }
            .into());
        }

        let mut net_weight = Decimal::ZERO;
        for &id in packing_ids {
            let packing = self.store.packings.get_by_id(id).await?.ok_or(
                ValidationError::MissingReference {
                    kind: "waste packing",
                    id,
                },
            )?;
            net_weight += packing.net_total();
        }
        Ok(net_weight)
    }

    async fn basis_for(&self, invoice: &Invoice) -> AppResult<AssessableBasis> {
        match invoice.rate {
            Some(rate) => Ok(AssessableBasis::NetWeight {
                net_weight: self.dispatched_net_weight(&invoice.packing_ids).await?,
                rate,
                rate_per: invoice.rate_per,
            }),
            None => Ok(AssessableBasis::Direct(invoice.assessable_value)),
        }
    }

    async fn recompute(&self, invoice: &mut Invoice) -> AppResult<()> {
        let basis = self.basis_for(invoice).await?;
        let totals = InvoiceTotals::compute(&basis, invoice.gst_percent)?;
        invoice.apply_totals(&totals);
        Ok(())
    }

    pub async fn create(&self, input: CreateInvoiceInput) -> AppResult<Invoice> {
        input.validate()?;

        let (assessable_value, rate) = match (input.assessable_value, input.rate) {
            (Some(amount), _) => (amount, None),
            (None, Some(rate)) => (Decimal::ZERO, Some(rate)),
            (None, None) => {
                return Err(ValidationError::MissingField {
                    field: "assessable_value",
                }
                .into())
            }
        };

        let mut invoice = Invoice {
            id: 0,
            invoice_no: input.invoice_no.trim().to_string(),
            date: input.date,
            party: input.party.trim().to_string(),
            sales_order_id: input.sales_order_id,
            packing_ids: input.packing_ids,
            rate,
            rate_per: input.rate_per,
            assessable_value,
            gst_percent: input.gst_percent.unwrap_or(self.default_gst_percent),
            gst: Decimal::ZERO,
            sub_total: Decimal::ZERO,
            invoice_value: Decimal::ZERO,
            status: RecordStatus::Draft,
        };
        self.ensure_references(&invoice).await?;
        self.recompute(&mut invoice).await?;
        invoice.status = invoice.status.transition(RecordStatus::Saved)?;

        let created = self.store.invoices.create(invoice).await?;
        tracing::info!(
            id = created.id,
            invoice_no = %created.invoice_no,
            invoice_value = %created.invoice_value,
            "Invoice created"
        );
        Ok(created)
    }

    pub async fn update(&self, id: i64, input: UpdateInvoiceInput) -> AppResult<Invoice> {
        let mut invoice = self.get(id).await?;
        if invoice.status.is_locked() {
            return Err(ValidationError::Locked { kind: KIND, id }.into());
        }

        if let Some(invoice_no) = input.invoice_no {
            invoice.invoice_no = invoice_no.trim().to_string();
            require_text(&invoice.invoice_no, "invoice_no")?;
        }
        if let Some(date) = input.date {
            invoice.date = date;
        }
        if let Some(party) = input.party {
            invoice.party = party.trim().to_string();
            require_text(&invoice.party, "party")?;
        }
        if let Some(order_id) = input.sales_order_id {
            invoice.sales_order_id = Some(order_id);
        }
        if let Some(packing_ids) = input.packing_ids {
            invoice.packing_ids = packing_ids;
        }
        if let Some(rate_per) = input.rate_per {
            invoice.rate_per = rate_per;
        }
        if let Some(gst_percent) = input.gst_percent {
            invoice.gst_percent = gst_percent;
        }
        match (input.assessable_value, input.rate) {
            (Some(amount), _) => {
                invoice.assessable_value = amount;
                invoice.rate = None;
            }
            (None, Some(rate)) => invoice.rate = Some(rate),
            (None, None) => {}
        }

        self.ensure_references(&invoice).await?;
        self.recompute(&mut invoice).await?;

        self.store.invoices.update(id, invoice).await
    }

    /// Lock a saved invoice
    pub async fn approve(&self, id: i64) -> AppResult<Invoice> {
        let mut invoice = self.get(id).await?;
        invoice.status = invoice.status.transition(RecordStatus::Approved)?;

        let approved = self.store.invoices.update(id, invoice).await?;
        tracing::info!(id, invoice_no = %approved.invoice_no, "Invoice approved");
        Ok(approved)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let invoice = self.get(id).await?;
        if invoice.status.is_locked() {
            return Err(ValidationError::Locked { kind: KIND, id }.into());
        }
        self.store.invoices.delete(id).await
    }
}
