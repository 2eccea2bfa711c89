//! Budget model and operations.
//!
//! Budgets are monthly: every budget period starts on the first day of a
//! month.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::client::LunchMoneyClient;
use crate::error::{LunchMoneyError, Result};
use crate::wire::Wire;

/// Budget summary for one category over a range of months.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub category_name: String,
    pub category_id: Option<u64>,
    pub category_group_name: Option<String>,
    /// Category group this category belongs to.
    pub group_id: Option<u64>,
    /// Whether this row is a category group.
    pub is_group: Option<bool>,
    pub is_income: bool,
    pub exclude_from_budget: bool,
    pub exclude_from_totals: bool,
    /// Per-month figures keyed by the month's first day.
    #[serde(default)]
    pub data: BTreeMap<NaiveDate, BudgetData>,
    pub config: Option<BudgetConfig>,
}

/// Budgeted and spent amounts for one month.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetData {
    pub budget_amount: Option<Decimal>,
    pub budget_currency: Option<String>,
    /// Budgeted amount in the primary currency.
    #[serde(rename = "budget_to_base")]
    pub budget_in_base: Option<Decimal>,
    /// Amount spent in the primary currency.
    #[serde(rename = "spending_to_base", default)]
    pub spent_in_base: Decimal,
    #[serde(default)]
    pub num_transactions: u32,
}

/// Recurring budget configuration for a category.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetConfig {
    pub config_id: u64,
    pub cadence: String,
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    #[serde(rename = "to_base")]
    pub base_amount: Option<Decimal>,
    pub auto_suggest: String,
}

impl Budget {
    /// Total spent in the primary currency across all months.
    pub fn total_spent(&self) -> Decimal {
        self.data.values().map(|d| d.spent_in_base).sum()
    }

    /// Figures for the month starting on `month`.
    pub fn month(&self, month: NaiveDate) -> Option<&BudgetData> {
        self.data.get(&month)
    }
}

impl Wire for Budget {}

/// Request body for setting a category's budget.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetUpsert {
    /// First day of the budgeted month.
    pub start_date: NaiveDate,
    pub category_id: u64,
    pub amount: Decimal,
    /// Defaults to the user's primary currency.
    pub currency: Option<String>,
}

impl Wire for BudgetUpsert {}

/// Category group budget recomputed after a sub-category budget changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroupBudget {
    pub category_group_id: u64,
    pub start_date: NaiveDate,
    pub amount: Decimal,
    pub currency: String,
}

#[derive(Debug, Deserialize)]
struct BudgetUpsertResponse {
    #[serde(default)]
    category_group: Option<CategoryGroupBudget>,
}

#[derive(Debug, Serialize)]
struct BudgetRangeParams {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

#[derive(Debug, Serialize)]
struct BudgetRemoveParams {
    start_date: NaiveDate,
    category_id: u64,
}

fn require_month_start(date: NaiveDate) -> Result<()> {
    if date.day() != 1 {
        return Err(LunchMoneyError::validation(format!(
            "budget start_date must be the first day of a month, got {date}"
        )));
    }
    Ok(())
}

/// Fetch budget summaries for all categories between two dates.
///
/// Amounts are aggregated per month over the range.
///
/// # Errors
///
/// Returns a validation error if `start_date` is after `end_date`.
#[tracing::instrument(skip(client))]
pub async fn get_budgets(
    client: &LunchMoneyClient,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Vec<Budget>> {
    if start_date > end_date {
        return Err(LunchMoneyError::validation(format!(
            "start_date {start_date} is after end_date {end_date}"
        )));
    }

    let params = BudgetRangeParams {
        start_date,
        end_date,
    };
    let response = client.get_with_query("budgets", &params).await?;
    LunchMoneyClient::decode(response).await
}

/// Insert or update the budget for a category and month.
///
/// Setting a sub-category's budget can change its category group's total;
/// when it does, the recomputed group budget is returned.
///
/// # Errors
///
/// Returns a validation error if `start_date` is not the first of a month.
#[tracing::instrument(skip(client))]
pub async fn upsert_budget(
    client: &LunchMoneyClient,
    budget: BudgetUpsert,
) -> Result<Option<CategoryGroupBudget>> {
    require_month_start(budget.start_date)?;

    let response = client.put("budgets", &budget).await?;
    let data: BudgetUpsertResponse = LunchMoneyClient::decode(response).await?;
    Ok(data.category_group)
}

/// Unset the budget for a category and month.
///
/// # Errors
///
/// Returns a validation error if `start_date` is not the first of a month.
#[tracing::instrument(skip(client))]
pub async fn remove_budget(
    client: &LunchMoneyClient,
    start_date: NaiveDate,
    category_id: u64,
) -> Result<bool> {
    require_month_start(start_date)?;

    let params = BudgetRemoveParams {
        start_date,
        category_id,
    };
    let response = client.delete_with_query("budgets", &params).await?;
    LunchMoneyClient::decode(response).await
}
