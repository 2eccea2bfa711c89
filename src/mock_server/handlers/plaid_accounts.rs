//! Plaid account endpoint handlers.

use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;

use super::SharedState;
use crate::PlaidAccount;

/// Response for listing Plaid accounts.
#[derive(Debug, Serialize)]
pub struct ListPlaidAccountsResponse {
    pub plaid_accounts: Vec<PlaidAccount>,
}

/// GET /plaid_accounts
pub async fn list_plaid_accounts(State(state): State<SharedState>) -> impl IntoResponse {
    let state = state.read().await;
    Json(ListPlaidAccountsResponse {
        plaid_accounts: state.plaid_accounts.clone(),
    })
}
