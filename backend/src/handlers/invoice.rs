//! Invoice HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::services::invoice::{CreateInvoiceInput, InvoiceService, UpdateInvoiceInput};
use crate::AppState;

fn invoice_service(state: &AppState) -> InvoiceService {
    InvoiceService::new(state.store.clone(), state.config.billing.default_gst_percent)
}

/// List invoices
pub async fn list_invoices(State(state): State<AppState>) -> impl IntoResponse {
    match invoice_service(&state).list().await {
        Ok(invoices) => (StatusCode::OK, Json(invoices)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_invoice(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    match invoice_service(&state).get(id).await {
        Ok(invoice) => (StatusCode::OK, Json(invoice)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Raise an invoice
pub async fn create_invoice(
    State(state): State<AppState>,
    Json(input): Json<CreateInvoiceInput>,
) -> impl IntoResponse {
    match invoice_service(&state).create(input).await {
        Ok(invoice) => (StatusCode::CREATED, Json(invoice)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_invoice(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateInvoiceInput>,
) -> impl IntoResponse {
    match invoice_service(&state).update(id, input).await {
        Ok(invoice) => (StatusCode::OK, Json(invoice)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Approve a saved invoice
pub async fn approve_invoice(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match invoice_service(&state).approve(id).await {
        Ok(invoice) => (StatusCode::OK, Json(invoice)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_invoice(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match invoice_service(&state).delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
