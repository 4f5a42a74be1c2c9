//! Waste lot HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::models::WasteLot;
use shared::resolution::PackingContext;

use crate::error::AppResult;
use crate::services::waste_lot::{CreateWasteLotInput, UpdateWasteLotInput, WasteLotService};
use crate::services::ResolutionService;
use crate::AppState;

/// List waste lots
pub async fn list_waste_lots(State(state): State<AppState>) -> AppResult<Json<Vec<WasteLot>>> {
    let service = WasteLotService::new(state.store);
    Ok(Json(service.list().await?))
}

pub async fn get_waste_lot(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<WasteLot>> {
    let service = WasteLotService::new(state.store);
    Ok(Json(service.get(id).await?))
}

/// Resolve a lot number to its waste master and packing type
pub async fn resolve_waste_lot(
    State(state): State<AppState>,
    Path(lot_no): Path<String>,
) -> AppResult<Json<PackingContext>> {
    let service = ResolutionService::new(state.store);
    Ok(Json(service.resolve(&lot_no).await?))
}

/// Create a waste lot
pub async fn create_waste_lot(
    State(state): State<AppState>,
    Json(input): Json<CreateWasteLotInput>,
) -> AppResult<(StatusCode, Json<WasteLot>)> {
    let service = WasteLotService::new(state.store);
    let lot = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(lot)))
}

pub async fn update_waste_lot(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateWasteLotInput>,
) -> AppResult<Json<WasteLot>> {
    let service = WasteLotService::new(state.store);
    Ok(Json(service.update(id, input).await?))
}

pub async fn delete_waste_lot(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let service = WasteLotService::new(state.store);
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
