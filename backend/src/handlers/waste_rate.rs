//! Waste rate HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use shared::models::{WasteMaster, WasteRate};

use crate::error::AppResult;
use crate::services::waste_rate::{
    AvailabilityQuery, CreateWasteRateInput, UpdateWasteRateInput, WasteRateService,
};
use crate::AppState;

/// List waste rates
pub async fn list_waste_rates(State(state): State<AppState>) -> AppResult<Json<Vec<WasteRate>>> {
    let service = WasteRateService::new(state.store);
    Ok(Json(service.list().await?))
}

/// Waste masters that have no rate on the requested date
pub async fn list_available_masters(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<Vec<WasteMaster>>> {
    let service = WasteRateService::new(state.store);
    Ok(Json(service.available(&query).await?))
}

pub async fn get_waste_rate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<WasteRate>> {
    let service = WasteRateService::new(state.store);
    Ok(Json(service.get(id).await?))
}

/// Quote a rate
pub async fn create_waste_rate(
    State(state): State<AppState>,
    Json(input): Json<CreateWasteRateInput>,
) -> AppResult<(StatusCode, Json<WasteRate>)> {
    let service = WasteRateService::new(state.store);
    let rate = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(rate)))
}

pub async fn update_waste_rate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateWasteRateInput>,
) -> AppResult<Json<WasteRate>> {
    let service = WasteRateService::new(state.store);
    Ok(Json(service.update(id, input).await?))
}

pub async fn delete_waste_rate(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let service = WasteRateService::new(state.store);
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
