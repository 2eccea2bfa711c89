//! Recurring expense model and trait implementations.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::client::LunchMoneyClient;
use crate::error::Result;
use crate::pagination::Page;
use crate::traits::List;
use crate::wire::Wire;

/// An expected, periodic expense such as a subscription or bill.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringExpense {
    pub id: u64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Billing frequency, e.g. "monthly", "twice a month", "yearly".
    pub cadence: String,
    pub payee: String,
    pub amount: Decimal,
    pub currency: String,
    pub description: Option<String>,
    /// Next expected billing date.
    pub billing_date: NaiveDate,
    /// Whether the expense was confirmed or only suggested.
    #[serde(rename = "type")]
    pub kind: RecurringKind,
    /// Payee as it appeared on the originating transaction.
    pub original_name: Option<String>,
    pub source: RecurringSource,
    pub plaid_account_id: Option<u64>,
    pub asset_id: Option<u64>,
    /// Transaction the expense was created from.
    pub transaction_id: Option<u64>,
    pub category_id: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Confirmation state of a recurring expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringKind {
    Cleared,
    Suggested,
}

/// How a recurring expense was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringSource {
    Manual,
    Transaction,
    System,
}

impl Wire for RecurringExpense {}

/// Query parameters for listing recurring expenses.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecurringExpenseQuery {
    /// Month to list expenses for. Defaults to the current month.
    pub start_date: Option<NaiveDate>,
    /// Report debits as negative amounts.
    pub debit_as_negative: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct RecurringExpenseListResponse {
    recurring_expenses: Vec<RecurringExpense>,
}

#[async_trait]
impl List for RecurringExpense {
    type Query = RecurringExpenseQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &LunchMoneyClient,
        query: &Self::Query,
        _offset: u32,
        _limit: u32,
    ) -> Result<Page<Self>> {
        let response = client.get_with_query("recurring_expenses", query).await?;
        let data: RecurringExpenseListResponse = LunchMoneyClient::decode(response).await?;
        Ok(Page::complete(data.recurring_expenses))
    }
}
