//! Budgets resource.

use chrono::NaiveDate;

use crate::client::LunchMoneyClient;
use crate::error::Result;
use crate::models::{get_budgets, remove_budget, upsert_budget, Budget, BudgetUpsert, CategoryGroupBudget};

/// Operations on `/budgets`.
#[derive(Debug, Clone)]
pub struct BudgetsApi {
    client: LunchMoneyClient,
}

impl BudgetsApi {
    pub(crate) fn new(client: LunchMoneyClient) -> Self {
        Self { client }
    }

    /// Budget summaries for every category between two dates.
    pub async fn summary(&self, start_date: NaiveDate, end_date: NaiveDate) -> Result<Vec<Budget>> {
        get_budgets(&self.client, start_date, end_date).await
    }

    pub async fn upsert(&self, budget: BudgetUpsert) -> Result<Option<CategoryGroupBudget>> {
        upsert_budget(&self.client, budget).await
    }

    pub async fn remove(&self, start_date: NaiveDate, category_id: u64) -> Result<bool> {
        remove_budget(&self.client, start_date, category_id).await
    }
}
