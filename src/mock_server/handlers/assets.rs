//! Asset endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use super::{error_response, SharedState};
use crate::{Asset, AssetUpdate, NewAsset};

/// Response for listing assets.
#[derive(Debug, Serialize)]
pub struct ListAssetsResponse {
    pub assets: Vec<Asset>,
}

/// GET /assets
pub async fn list_assets(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    let assets = state.assets.values().cloned().collect();
    Json(ListAssetsResponse { assets })
}

/// POST /assets
pub async fn create_asset(
    State(state): State<SharedState>,
    Json(new): Json<NewAsset>,
) -> impl IntoResponse {
    if new.name.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "name is required");
    }

    let mut state = state.write().await;
    let asset = state.create_asset(new);
    (StatusCode::CREATED, Json(asset)).into_response()
}

/// PUT /assets/{id}
pub async fn update_asset(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
    Json(update): Json<AssetUpdate>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    match state.update_asset(id, update) {
        Some(asset) => (StatusCode::OK, Json(asset)).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("No asset found with id: {id}"),
        ),
    }
}
