//! Transaction groups resource.

use crate::client::LunchMoneyClient;
use crate::error::Result;
use crate::models::{
    get_transaction_group, group_transactions, ungroup_transactions, GroupTransactionsRequest,
    Transaction,
};

/// Operations on `/transactions/group`.
#[derive(Debug, Clone)]
pub struct GroupsApi {
    client: LunchMoneyClient,
}

impl GroupsApi {
    pub(crate) fn new(client: LunchMoneyClient) -> Self {
        Self { client }
    }

    /// Group the given transactions with default group details.
    ///
    /// See [`group_transactions`] for the failure modes.
    pub async fn group(&self, ids: impl IntoIterator<Item = u64>) -> Result<Transaction> {
        self.group_with(GroupTransactionsRequest::new(ids)).await
    }

    /// Group transactions using a fully specified request.
    pub async fn group_with(&self, request: GroupTransactionsRequest) -> Result<Transaction> {
        group_transactions(&self.client, request).await
    }

    /// Dissolve a group. Fails with not-found if it was already dissolved.
    pub async fn ungroup(&self, group_id: u64) -> Result<()> {
        ungroup_transactions(&self.client, group_id).await
    }

    /// Fetch a group with its children.
    pub async fn get(&self, group_id: u64) -> Result<Transaction> {
        get_transaction_group(&self.client, group_id).await
    }
}
