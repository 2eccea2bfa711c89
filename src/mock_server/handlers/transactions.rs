//! Transaction and transaction group endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use super::{error_response, SharedState};
use crate::{
    GroupTransactionsRequest, InsertTransactionsRequest, InsertTransactionsResponse,
    PaginationParams, SkippedExternalId, Transaction, TransactionListQuery, TransactionUpdate,
    DEFAULT_PAGE_SIZE,
};

/// Response for listing transactions.
#[derive(Debug, Serialize)]
pub struct ListTransactionsResponse {
    pub transactions: Vec<Transaction>,
    pub has_more: bool,
}

/// GET /transactions
pub async fn list_transactions(
    State(state): State<SharedState>,
    Query(query): Query<TransactionListQuery>,
    Query(window): Query<PaginationParams>,
) -> impl IntoResponse {
    let state = state.read().await;

    let offset = window.offset.unwrap_or(0) as usize;
    let limit = window.limit.unwrap_or(DEFAULT_PAGE_SIZE) as usize;

    let all = state.list_transactions(&query);
    let has_more = offset + limit < all.len();
    let transactions = all.into_iter().skip(offset).take(limit).collect();

    Json(ListTransactionsResponse {
        transactions,
        has_more,
    })
}

/// GET /transactions/{id}
pub async fn get_transaction(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    let state = state.read().await;

    match state.get_transaction(id) {
        Some(transaction) => (StatusCode::OK, Json(transaction)).into_response(),
        None => error_response(
            StatusCode::NOT_FOUND,
            format!("No transaction found with id: {id}"),
        ),
    }
}

/// POST /transactions
pub async fn insert_transactions(
    State(state): State<SharedState>,
    Json(request): Json<InsertTransactionsRequest>,
) -> impl IntoResponse {
    if request.transactions.is_empty() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "transactions must contain at least one item",
        );
    }

    let mut state = state.write().await;
    let (transactions, skipped) = match state.insert_transactions(request.transactions) {
        Ok(result) => result,
        Err(err) => return err.into_response(),
    };

    let skipped_existing_external_ids = skipped
        .into_iter()
        .map(
            |(request_transactions_index, existing_transaction_id, external_id)| {
                SkippedExternalId {
                    request_transactions_index,
                    existing_transaction_id,
                    external_id,
                }
            },
        )
        .collect();

    (
        StatusCode::CREATED,
        Json(InsertTransactionsResponse {
            transactions,
            skipped_existing_external_ids,
        }),
    )
        .into_response()
}

/// PUT /transactions/{id}
pub async fn update_transaction(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
    Json(update): Json<TransactionUpdate>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    match state.update_transaction(id, update) {
        Ok(transaction) => (StatusCode::OK, Json(transaction)).into_response(),
        Err(err) => err.into_response(),
    }
}

/// DELETE /transactions/{id}
pub async fn delete_transaction(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    match state.delete_transaction(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}

/// POST /transactions/group
pub async fn group_transactions(
    State(state): State<SharedState>,
    Json(request): Json<GroupTransactionsRequest>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    match state.group_transactions(request) {
        Ok(group) => (StatusCode::CREATED, Json(group)).into_response(),
        Err(err) => err.into_response(),
    }
}

/// DELETE /transactions/group/{id}
pub async fn ungroup_transactions(
    State(state): State<SharedState>,
    Path(id): Path<u64>,
) -> impl IntoResponse {
    let mut state = state.write().await;

    match state.ungroup_transactions(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => err.into_response(),
    }
}
