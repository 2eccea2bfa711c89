//! Recurring expense endpoint handlers.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use super::SharedState;
use crate::{RecurringExpense, RecurringExpenseQuery};

/// Response for listing recurring expenses.
#[derive(Debug, Serialize)]
pub struct ListRecurringExpensesResponse {
    pub recurring_expenses: Vec<RecurringExpense>,
}

/// GET /recurring_expenses
pub async fn list_recurring_expenses(
    State(state): State<SharedState>,
    Query(query): Query<RecurringExpenseQuery>,
) -> impl IntoResponse {
    let state = state.read().await;

    let recurring_expenses = state
        .recurring_expenses
        .iter()
        .filter(|e| {
            query
                .start_date
                .map_or(true, |start| e.end_date.map_or(true, |end| end >= start))
        })
        .cloned()
        .map(|mut e| {
            if query.debit_as_negative == Some(true) {
                e.amount = -e.amount;
            }
            e
        })
        .collect();

    Json(ListRecurringExpensesResponse { recurring_expenses })
}
