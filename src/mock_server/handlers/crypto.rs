//! Crypto holding endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use super::{error_response, SharedState};
use crate::{CryptoHolding, CryptoUpdate};

/// Response for listing crypto holdings.
#[derive(Debug, Serialize)]
pub struct ListCryptoResponse {
    pub crypto: Vec<CryptoHolding>,
}

/// GET /crypto
pub async fn list_crypto(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    Json(ListCryptoResponse {
        crypto: state.crypto.clone(),
    })
}

/// PUT /crypto/manual/{id}
pub async fn update_crypto(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
    Json(update): Json<CryptoUpdate>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    match state.update_crypto(id, update) {
        Some(holding) => (StatusCode::OK, Json(holding)).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("No manual crypto holding found with id: {id}"),
        ),
    }
}
