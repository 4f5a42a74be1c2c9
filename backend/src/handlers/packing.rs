//! Waste packing HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::services::packing::{
    CreatePackingInput, GeneratePackingInput, PackingService, UpdatePackingInput,
};
use crate::AppState;

fn packing_service(state: &AppState) -> PackingService {
    PackingService::new(state.store.clone(), state.config.billing.bale_prefix.clone())
}

/// List packings
pub async fn list_packings(State(state): State<AppState>) -> impl IntoResponse {
    match packing_service(&state).list().await {
        Ok(packings) => (StatusCode::OK, Json(packings)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn get_packing(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    match packing_service(&state).get(id).await {
        Ok(packing) => (StatusCode::OK, Json(packing)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Generate a draft bale list; nothing is saved
pub async fn generate_packing(
    State(state): State<AppState>,
    Json(input): Json<GeneratePackingInput>,
) -> impl IntoResponse {
    match packing_service(&state).generate(input).await {
        Ok(draft) => (StatusCode::OK, Json(draft)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Save a packing after reconciling its bales
pub async fn create_packing(
    State(state): State<AppState>,
    Json(input): Json<CreatePackingInput>,
) -> impl IntoResponse {
    match packing_service(&state).create(input).await {
        Ok(packing) => (StatusCode::CREATED, Json(packing)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn update_packing(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<UpdatePackingInput>,
) -> impl IntoResponse {
    match packing_service(&state).update(id, input).await {
        Ok(packing) => (StatusCode::OK, Json(packing)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Approve a saved packing
pub async fn approve_packing(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match packing_service(&state).approve(id).await {
        Ok(packing) => (StatusCode::OK, Json(packing)).into_response(),
        Err(e) => e.into_response(),
    }
}

pub async fn delete_packing(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    match packing_service(&state).delete(id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => e.into_response(),
    }
}
