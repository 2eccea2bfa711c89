//! HTTP request handlers for the mock server.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::RwLock;

use super::state::{MockState, StateError};

pub mod assets;
pub mod budgets;
pub mod crypto;
pub mod plaid_accounts;
pub mod recurring;
pub mod transactions;

pub use assets::*;
pub use budgets::*;
pub use crypto::*;
pub use plaid_accounts::*;
pub use recurring::*;
pub use transactions::*;

/// State handle shared by every handler.
pub type SharedState = Arc<RwLock<MockState>>;

/// Build an error body in the shape the live API uses.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let message = message.into();
    (
        status,
        Json(serde_json::json!({
            "message": message,
            "errors": [{ "errMsg": message }]
        })),
    )
        .into_response()
}

impl IntoResponse for StateError {
    fn into_response(self) -> Response {
        match self {
            StateError::Invalid(message) => error_response(StatusCode::BAD_REQUEST, message),
            StateError::NotFound(message) => error_response(StatusCode::NOT_FOUND, message),
        }
    }
}
