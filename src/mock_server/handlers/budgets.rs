//! Budget endpoint handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;

use super::{error_response, SharedState};
use crate::BudgetUpsert;

/// Query parameters for budget summaries.
#[derive(Debug, Deserialize)]
pub struct BudgetRangeQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Query parameters for removing a budget.
#[derive(Debug, Deserialize)]
pub struct RemoveBudgetQuery {
    pub start_date: NaiveDate,
    pub category_id: u64,
}

fn not_month_start(date: NaiveDate) -> Option<axum::response::Response> {
    (date.day() != 1).then(|| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("start_date must be the first day of a month: {date}"),
        )
    })
}

/// GET /budgets
pub async fn get_budgets(
    State(state): State<SharedState>,
    Query(query): Query<BudgetRangeQuery>,
) -> impl IntoResponse {
    if query.start_date > query.end_date {
        return error_response(StatusCode::BAD_REQUEST, "start_date is after end_date");
    }

    let state = state.read().await;
    (
        StatusCode::OK,
        Json(state.budgets_between(query.start_date, query.end_date)),
    )
        .into_response()
}

/// PUT /budgets
pub async fn upsert_budget(
    State(state): State<SharedState>,
    Json(upsert): Json<BudgetUpsert>,
) -> impl IntoResponse {
    if let Some(rejection) = not_month_start(upsert.start_date) {
        return rejection;
    }

    let mut state = state.write().await;
    match state.upsert_budget(
        upsert.start_date,
        upsert.category_id,
        upsert.amount,
        upsert.currency,
    ) {
        // Categories in the mock have no group to recompute
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "category_group": null })),
        )
            .into_response(),
        Err(err) => err.into_response(),
    }
}

/// DELETE /budgets
pub async fn remove_budget(
    State(state): State<SharedState>,
    Query(query): Query<RemoveBudgetQuery>,
) -> impl IntoResponse {
    if let Some(rejection) = not_month_start(query.start_date) {
        return rejection;
    }

    let mut state = state.write().await;
    match state.remove_budget(query.start_date, query.category_id) {
        Ok(()) => (StatusCode::OK, Json(true)).into_response(),
        Err(err) => err.into_response(),
    }
}
