//! Waste master HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::models::WasteMaster;

use crate::error::AppResult;
use crate::services::waste_master::{CreateWasteMasterInput, UpdateWasteMasterInput, WasteMasterService};
use crate::AppState;

/// List waste masters
pub async fn list_waste_masters(State(state): State<AppState>) -> AppResult<Json<Vec<WasteMaster>>> {
    let service = WasteMasterService::new(state.store);
    Ok(Json(service.list().await?))
}

pub async fn get_waste_master(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<WasteMaster>> {
    let service = WasteMasterService::new(state.store);
    Ok(Json(service.get(id).await?))
}

/// Create a waste master
pub async fn create_waste_master(
    State(state): State<AppState>,
    Json(input): Json<CreateWasteMasterInput>,
) -> AppResult<(StatusCode, Json<WasteMaster>)> {
    let service = WasteMasterService::new(state.store);
    let master = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(master)))
}

pub async fn update_waste_master(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdateWasteMasterInput>,
) -> AppResult<Json<WasteMaster>> {
    let service = WasteMasterService::new(state.store);
    Ok(Json(service.update(id, input).await?))
}

pub async fn delete_waste_master(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let service = WasteMasterService::new(state.store);
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
