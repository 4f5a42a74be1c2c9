//! Sales order HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::models::SalesOrder;

use crate::error::AppResult;
use crate::services::sales_order::{CreateSalesOrderInput, SalesOrderService, UpdateSalesOrderInput};
use crate::AppState;

/// List sales orders
pub async fn list_sales_orders(State(state): State<AppState>) -> AppResult<Json<Vec<SalesOrder>>> {
    let service = SalesOrderService::new(state.store);
    Ok(Json(service.list().await?))
}

pub async fn get_sales_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<SalesOrder>> {
    let service = SalesOrderService::new(state.store);
    Ok(Json(service.get(id).await?))
}

/// Create a sales order; line values are derived server-side
pub async fn create_sales_order(
    State(state): State<AppState>,
    Json(input): Json<CreateSalesOrderInput>,
) -> AppResult<(StatusCode, Json<SalesOrder>)> {
    let service = SalesOrderService::new(state.store);
    let order = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn update_sales_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateSalesOrderInput>,
) -> AppResult<Json<SalesOrder>> {
    let service = SalesOrderService::new(state.store);
    Ok(Json(service.update(id, input).await?))
}

pub async fn delete_sales_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let service = SalesOrderService::new(state.store);
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
