//! Transaction grouping.
//!
//! A transaction group is a synthetic transaction that stands in for two or
//! more existing transactions. Its amount is the sum of its children's
//! amounts; when the children use different currencies the server converts
//! them and expresses the sum in the user's primary currency.
//!
//! Once grouped, the children are hidden from standard listings but can
//! still be fetched by id, and the group returns them under `children`.
//! Ungrouping deletes the group and restores the children to listings.
//!
//! Both calls change server-side state and are not idempotent: grouping the
//! same ids twice fails because they are no longer ungrouped, and ungrouping
//! the same group twice fails with [`LunchMoneyError::NotFound`].

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::client::LunchMoneyClient;
use crate::error::{LunchMoneyError, Result};
use crate::models::transaction::Transaction;
use crate::traits::Get;
use crate::wire::Wire;

/// Fewest transactions a group can be made from.
pub const MIN_GROUP_SIZE: usize = 2;

/// Request body for creating a transaction group.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupTransactionsRequest {
    /// IDs of the transactions to group.
    pub ids: BTreeSet<u64>,

    /// Date of the group transaction.
    pub date: Option<NaiveDate>,

    /// Payee of the group transaction.
    pub payee: Option<String>,

    /// Category of the group transaction.
    pub category_id: Option<u64>,

    /// Notes on the group transaction.
    pub notes: Option<String>,

    /// Tags to attach to the group transaction.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_ids: Vec<u64>,
}

impl GroupTransactionsRequest {
    /// Group the given transactions. Duplicate ids are collapsed.
    pub fn new(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Set the group's date.
    #[must_use]
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the group's payee.
    #[must_use]
    pub fn with_payee(mut self, payee: impl Into<String>) -> Self {
        self.payee = Some(payee.into());
        self
    }

    /// Set the group's category.
    #[must_use]
    pub fn with_category(mut self, category_id: u64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Set the group's notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Check the request before sending it.
    ///
    /// # Errors
    ///
    /// Returns [`LunchMoneyError::Validation`] if fewer than
    /// [`MIN_GROUP_SIZE`] distinct ids are given.
    pub fn validate(&self) -> Result<()> {
        if self.ids.len() < MIN_GROUP_SIZE {
            return Err(LunchMoneyError::validation(format!(
                "a transaction group needs at least {MIN_GROUP_SIZE} distinct transactions, got {}",
                self.ids.len()
            )));
        }
        Ok(())
    }
}

impl Wire for GroupTransactionsRequest {}

/// Create a transaction group from existing transactions.
///
/// Returns the new group transaction with its `children` populated.
///
/// # Errors
///
/// Returns [`LunchMoneyError::Validation`] without contacting the server if
/// fewer than two distinct ids are given, and when the server rejects an id
/// that does not name an existing, ungrouped transaction.
///
/// # Example
///
/// ```ignore
/// use lunchmoney::{group_transactions, GroupTransactionsRequest, LunchMoneyClient};
///
/// let client = LunchMoneyClient::from_env()?;
/// let group = group_transactions(
///     &client,
///     GroupTransactionsRequest::new([10, 11]).with_payee("Dinner"),
/// ).await?;
/// assert_eq!(group.child_ids(), vec![10, 11]);
/// ```
#[tracing::instrument(skip(client, request), fields(ids = ?request.ids))]
pub async fn group_transactions(
    client: &LunchMoneyClient,
    request: GroupTransactionsRequest,
) -> Result<Transaction> {
    request.validate()?;

    let response = client.post("transactions/group", &request).await?;
    let group: Transaction = LunchMoneyClient::decode(response).await?;

    tracing::debug!(group_id = group.id, "created transaction group");
    Ok(group)
}

/// Delete a transaction group, returning its children to normal listings.
///
/// # Errors
///
/// Returns [`LunchMoneyError::NotFound`] if `group_id` does not name an
/// existing group, including a group that was already ungrouped.
#[tracing::instrument(skip(client))]
pub async fn ungroup_transactions(client: &LunchMoneyClient, group_id: u64) -> Result<()> {
    client
        .delete(&format!("transactions/group/{group_id}"))
        .await?;
    Ok(())
}

/// Fetch a transaction group together with its children.
///
/// # Errors
///
/// Returns [`LunchMoneyError::NotFound`] if the id is unknown or names a
/// transaction that is not a group.
#[tracing::instrument(skip(client))]
pub async fn get_transaction_group(client: &LunchMoneyClient, group_id: u64) -> Result<Transaction> {
    let transaction = Transaction::get(client, group_id).await?;
    if !transaction.is_group() {
        return Err(LunchMoneyError::NotFound {
            message: format!("transaction {group_id} is not a transaction group"),
        });
    }
    Ok(transaction)
}
