//! Recurring expenses resource.

use crate::client::LunchMoneyClient;
use crate::error::Result;
use crate::models::{RecurringExpense, RecurringExpenseQuery};
use crate::traits::List;

/// Operations on `/recurring_expenses`.
#[derive(Debug, Clone)]
pub struct RecurringExpensesApi {
    client: LunchMoneyClient,
}

impl RecurringExpensesApi {
    pub(crate) fn new(client: LunchMoneyClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &RecurringExpenseQuery) -> Result<Vec<RecurringExpense>> {
        RecurringExpense::list_all(&self.client, query).await
    }
}
