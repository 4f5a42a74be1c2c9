//! Packing type HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use shared::models::PackingType;

use crate::error::AppResult;
use crate::services::packing_type::{CreatePackingTypeInput, PackingTypeService, UpdatePackingTypeInput};
use crate::AppState;

/// List packing types
pub async fn list_packing_types(State(state): State<AppState>) -> AppResult<Json<Vec<PackingType>>> {
    let service = PackingTypeService::new(state.store);
    let packing_types = service.list().await?;
    Ok(Json(packing_types))
}

pub async fn get_packing_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<PackingType>> {
    let service = PackingTypeService::new(state.store);
    let packing_type = service.get(id).await?;
    Ok(Json(packing_type))
}

/// Create a packing type
pub async fn create_packing_type(
    State(state): State<AppState>,
    Json(input): Json<CreatePackingTypeInput>,
) -> AppResult<(StatusCode, Json<PackingType>)> {
    let service = PackingTypeService::new(state.store);
    let packing_type = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(packing_type)))
}

pub async fn update_packing_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdatePackingTypeInput>,
) -> AppResult<Json<PackingType>> {
    let service = PackingTypeService::new(state.store);
    let packing_type = service.update(id, input).await?;
    Ok(Json(packing_type))
}

pub async fn delete_packing_type(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    let service = PackingTypeService::new(state.store);
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
