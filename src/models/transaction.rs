//! Transaction model and trait implementations.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::client::LunchMoneyClient;
use crate::error::{LunchMoneyError, Result};
use crate::pagination::{Page, PaginationParams};
use crate::traits::{Create, Delete, Get, List, Update};
use crate::wire::Wire;

/// A Lunch Money transaction.
///
/// A transaction is either a leaf (an imported or manually entered
/// transaction), a group aggregating other transactions, or a child of a
/// group. Grouped children carry the group's id in [`group_id`] and are
/// omitted from standard listings; the group returns them under
/// [`children`].
///
/// [`group_id`]: Transaction::group_id
/// [`children`]: Transaction::children
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique transaction ID.
    pub id: u64,

    /// Date the transaction posted.
    pub date: NaiveDate,

    /// Amount in `currency`. Positive values are debits.
    pub amount: Decimal,

    /// Lowercase ISO 4217 currency code.
    pub currency: String,

    /// Amount converted to the user's primary currency.
    #[serde(rename = "to_base")]
    pub base_amount: Option<Decimal>,

    /// Payee or merchant name.
    pub payee: Option<String>,

    /// Clearing status.
    pub status: TransactionStatus,

    /// Assigned category.
    pub category_id: Option<u64>,

    /// Free-form notes.
    pub notes: Option<String>,

    /// Manually managed account this transaction belongs to.
    pub asset_id: Option<u64>,

    /// Synced account this transaction belongs to.
    pub plaid_account_id: Option<u64>,

    /// Recurring expense this transaction was matched to.
    #[serde(rename = "recurring_id")]
    pub recurring_expense_id: Option<u64>,

    /// Parent transaction, set on the parts of a split transaction.
    pub parent_id: Option<u64>,

    /// Group this transaction was folded into.
    pub group_id: Option<u64>,

    /// Whether this transaction is itself a transaction group.
    #[serde(rename = "is_group")]
    pub grouped: Option<bool>,

    /// Caller-assigned identifier used to deduplicate inserts.
    pub external_id: Option<String>,

    /// Tags attached to the transaction.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,

    /// Grouped transactions on a group, or the parts of a split transaction.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Transaction>,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Clearing status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Cleared,
    Uncleared,
    Recurring,
    Pending,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Cleared => "cleared",
            Self::Uncleared => "uncleared",
            Self::Recurring => "recurring",
            Self::Pending => "pending",
        };
        f.write_str(s)
    }
}

/// A tag attached to a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
}

impl Transaction {
    /// Create a cleared transaction with only the required fields set.
    pub fn new(id: u64, date: NaiveDate, amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            id,
            date,
            amount,
            currency: currency.into(),
            base_amount: None,
            payee: None,
            status: TransactionStatus::Cleared,
            category_id: None,
            notes: None,
            asset_id: None,
            plaid_account_id: None,
            recurring_expense_id: None,
            parent_id: None,
            group_id: None,
            grouped: None,
            external_id: None,
            tags: Vec::new(),
            children: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Check if this transaction is a transaction group.
    pub fn is_group(&self) -> bool {
        self.grouped.unwrap_or(false)
    }

    /// Check if this transaction has been folded into a group.
    pub fn is_grouped_child(&self) -> bool {
        self.group_id.is_some()
    }

    /// Check if this transaction is one part of a split.
    pub fn is_split_part(&self) -> bool {
        self.parent_id.is_some()
    }

    /// IDs of the transactions in this group.
    pub fn child_ids(&self) -> Vec<u64> {
        self.children.iter().map(|c| c.id).collect()
    }

    /// Sum of the children's amounts, if they all share one currency.
    ///
    /// Returns `None` for a transaction without children or when children
    /// mix currencies, since the conversion is done server-side.
    pub fn children_total(&self) -> Option<Decimal> {
        let first = self.children.first()?;
        if self
            .children
            .iter()
            .any(|c| !c.currency.eq_ignore_ascii_case(&first.currency))
        {
            return None;
        }
        Some(self.children.iter().map(|c| c.amount).sum())
    }
}

impl Wire for Transaction {}

/// Query parameters for listing transactions.
///
/// Without a date range the server returns the current calendar month.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionListQuery {
    /// Earliest transaction date (inclusive). Requires `end_date`.
    pub start_date: Option<NaiveDate>,

    /// Latest transaction date (inclusive). Requires `start_date`.
    pub end_date: Option<NaiveDate>,

    /// Only transactions with this status.
    pub status: Option<TransactionStatus>,

    /// Only transactions in this category.
    pub category_id: Option<u64>,

    /// Only transactions in this manually managed account.
    pub asset_id: Option<u64>,

    /// Only transactions in this synced account.
    pub plaid_account_id: Option<u64>,
}

impl TransactionListQuery {
    /// Query for transactions within a date range.
    pub fn between(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<()> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start > end => Err(LunchMoneyError::validation(format!(
                "start_date {start} is after end_date {end}"
            ))),
            (Some(_), None) | (None, Some(_)) => Err(LunchMoneyError::validation(
                "start_date and end_date must be given together",
            )),
            _ => Ok(()),
        }
    }
}

/// A transaction to insert.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub amount: Decimal,
    /// Defaults to the user's primary currency.
    pub currency: Option<String>,
    pub payee: Option<String>,
    pub category_id: Option<u64>,
    pub asset_id: Option<u64>,
    #[serde(rename = "recurring_id")]
    pub recurring_expense_id: Option<u64>,
    pub notes: Option<String>,
    pub status: Option<TransactionStatus>,
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_ids: Vec<u64>,
}

impl NewTransaction {
    /// A transaction with only the required fields set.
    pub fn new(date: NaiveDate, amount: Decimal) -> Self {
        Self {
            date,
            amount,
            currency: None,
            payee: None,
            category_id: None,
            asset_id: None,
            recurring_expense_id: None,
            notes: None,
            status: None,
            external_id: None,
            tag_ids: Vec::new(),
        }
    }

    /// Set the payee.
    #[must_use]
    pub fn with_payee(mut self, payee: impl Into<String>) -> Self {
        self.payee = Some(payee.into());
        self
    }

    /// Set the currency.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

impl Wire for NewTransaction {}

/// Request body for inserting transactions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertTransactionsRequest {
    pub transactions: Vec<NewTransaction>,
    /// Apply the account's rules to the inserted transactions.
    #[serde(default)]
    pub apply_rules: bool,
    /// Skip transactions that look like duplicates of existing ones.
    #[serde(default)]
    pub skip_duplicates: bool,
    /// Match inserted transactions against recurring expenses.
    #[serde(default)]
    pub check_for_recurring: bool,
    /// Treat negative amounts as debits.
    #[serde(default)]
    pub debit_as_negative: bool,
    /// Leave asset balances untouched.
    #[serde(default = "default_true")]
    pub skip_balance_update: bool,
}

fn default_true() -> bool {
    true
}

impl Default for InsertTransactionsRequest {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            apply_rules: false,
            skip_duplicates: false,
            check_for_recurring: false,
            debit_as_negative: false,
            skip_balance_update: true,
        }
    }
}

impl InsertTransactionsRequest {
    /// Insert the given transactions with default options.
    pub fn new(transactions: Vec<NewTransaction>) -> Self {
        Self {
            transactions,
            ..Default::default()
        }
    }
}

impl Wire for InsertTransactionsRequest {}

/// Response to a transaction insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertTransactionsResponse {
    /// The transactions that were created.
    pub transactions: Vec<Transaction>,
    /// Requested transactions skipped because their external id exists.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_existing_external_ids: Vec<SkippedExternalId>,
}

impl Wire for InsertTransactionsResponse {}

/// A requested insert skipped because of a duplicate external id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedExternalId {
    /// Position of the skipped transaction in the request.
    pub request_transactions_index: u32,
    /// The existing transaction holding that external id.
    pub existing_transaction_id: u64,
    pub external_id: String,
}

/// Smallest number of parts a split can have.
pub const MIN_SPLIT_PARTS: usize = 2;

/// One part of a split transaction.
///
/// The parts' amounts must add up to the amount of the transaction being
/// split. Unset fields are inherited from it.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionSplit {
    pub amount: Decimal,
    pub date: Option<NaiveDate>,
    pub payee: Option<String>,
    pub category_id: Option<u64>,
    pub notes: Option<String>,
}

impl TransactionSplit {
    /// A part with only its amount set.
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount,
            date: None,
            payee: None,
            category_id: None,
            notes: None,
        }
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category_id: u64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Set the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

/// Fields to change on an existing transaction.
///
/// Setting `split` divides the transaction into new transactions whose
/// `parent_id` points back at it. Split parts, groups, grouped children and
/// recurring transactions cannot be split.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionUpdate {
    pub date: Option<NaiveDate>,
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub payee: Option<String>,
    pub category_id: Option<u64>,
    pub notes: Option<String>,
    pub status: Option<TransactionStatus>,
    pub asset_id: Option<u64>,
    #[serde(rename = "recurring_id")]
    pub recurring_expense_id: Option<u64>,
    pub external_id: Option<String>,
    pub tag_ids: Option<Vec<u64>>,
    pub split: Option<Vec<TransactionSplit>>,
    /// Treat negative amounts as debits.
    pub debit_as_negative: Option<bool>,
    /// Leave the account balance untouched when the amount changes.
    pub skip_balance_update: Option<bool>,
}

impl TransactionUpdate {
    /// An update that splits the transaction into the given parts.
    pub fn split(parts: Vec<TransactionSplit>) -> Self {
        Self {
            split: Some(parts),
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<()> {
        match &self.split {
            Some(parts) if parts.len() < MIN_SPLIT_PARTS => {
                Err(LunchMoneyError::validation(format!(
                    "a split needs at least {MIN_SPLIT_PARTS} parts, got {}",
                    parts.len()
                )))
            }
            Some(parts) => match self.amount {
                Some(amount) if parts.iter().map(|p| p.amount).sum::<Decimal>() != amount => {
                    Err(LunchMoneyError::validation(format!(
                        "split parts must add up to the transaction amount {amount}"
                    )))
                }
                _ => Ok(()),
            },
            None => Ok(()),
        }
    }
}

impl Wire for TransactionUpdate {}

/// API response wrapper for listing transactions.
#[derive(Debug, Deserialize)]
struct TransactionListResponse {
    transactions: Vec<Transaction>,
    #[serde(default)]
    has_more: Option<bool>,
}

#[async_trait]
impl Get for Transaction {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &LunchMoneyClient, id: u64) -> Result<Self> {
        let response = client.get(&format!("transactions/{id}")).await?;
        LunchMoneyClient::decode(response).await
    }
}

#[async_trait]
impl List for Transaction {
    type Query = TransactionListQuery;

    #[tracing::instrument(skip(client))]
    async fn list_page(
        client: &LunchMoneyClient,
        query: &Self::Query,
        offset: u32,
        limit: u32,
    ) -> Result<Page<Self>> {
        query.validate()?;

        #[derive(Serialize)]
        struct RequestParams<'a> {
            #[serde(flatten)]
            query: &'a TransactionListQuery,
            #[serde(flatten)]
            window: PaginationParams,
        }

        let params = RequestParams {
            query,
            window: PaginationParams::window(offset, limit),
        };

        let response = client.get_with_query("transactions", &params).await?;
        let data: TransactionListResponse = LunchMoneyClient::decode(response).await?;

        Ok(Page::new(data.transactions, offset, limit, data.has_more))
    }
}

#[async_trait]
impl Create for Transaction {
    type Params = InsertTransactionsRequest;
    type Output = InsertTransactionsResponse;

    #[tracing::instrument(skip(client, params), fields(count = params.transactions.len()))]
    async fn create(client: &LunchMoneyClient, params: Self::Params) -> Result<Self::Output> {
        if params.transactions.is_empty() {
            return Err(LunchMoneyError::validation(
                "at least one transaction is required",
            ));
        }

        let response = client.post("transactions", &params).await?;
        LunchMoneyClient::decode(response).await
    }
}

#[async_trait]
impl Update for Transaction {
    type Id = u64;
    type Params = TransactionUpdate;

    #[tracing::instrument(skip(client))]
    async fn update(client: &LunchMoneyClient, id: u64, params: Self::Params) -> Result<Self> {
        params.validate()?;

        let response = client.put(&format!("transactions/{id}"), &params).await?;
        LunchMoneyClient::decode(response).await
    }
}

#[async_trait]
impl Delete for Transaction {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn delete(client: &LunchMoneyClient, id: u64) -> Result<()> {
        client.delete(&format!("transactions/{id}")).await?;
        Ok(())
    }
}

/// Fetch every transaction matching the query, across all pages.
///
/// # Example
///
/// ```ignore
/// use chrono::NaiveDate;
/// use lunchmoney::{get_transactions, LunchMoneyClient, TransactionListQuery};
///
/// let client = LunchMoneyClient::from_env()?;
/// let query = TransactionListQuery::between(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
/// );
/// let transactions = get_transactions(&client, query).await?;
/// ```
pub async fn get_transactions(
    client: &LunchMoneyClient,
    query: TransactionListQuery,
) -> Result<Vec<Transaction>> {
    Transaction::list_all(client, &query).await
}
