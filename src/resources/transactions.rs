//! Transactions resource.

use crate::client::LunchMoneyClient;
use crate::error::Result;
use crate::models::{
    InsertTransactionsRequest, InsertTransactionsResponse, Transaction, TransactionListQuery,
    TransactionUpdate,
};
use crate::pagination::Page;
use crate::traits::{Create, Delete, Get, List, Update};

/// Operations on `/transactions`.
#[derive(Debug, Clone)]
pub struct TransactionsApi {
    client: LunchMoneyClient,
}

impl TransactionsApi {
    pub(crate) fn new(client: LunchMoneyClient) -> Self {
        Self { client }
    }

    /// Fetch one transaction. Grouped children remain fetchable by id.
    pub async fn get(&self, id: u64) -> Result<Transaction> {
        Transaction::get(&self.client, id).await
    }

    /// Fetch one page of transactions. Grouped children are not listed.
    pub async fn list_page(
        &self,
        query: &TransactionListQuery,
        offset: u32,
        limit: u32,
    ) -> Result<Page<Transaction>> {
        Transaction::list_page(&self.client, query, offset, limit).await
    }

    /// Fetch every transaction matching the query.
    pub async fn list_all(&self, query: &TransactionListQuery) -> Result<Vec<Transaction>> {
        Transaction::list_all(&self.client, query).await
    }

    /// Insert new transactions.
    pub async fn insert(
        &self,
        request: InsertTransactionsRequest,
    ) -> Result<InsertTransactionsResponse> {
        Transaction::create(&self.client, request).await
    }

    /// Change fields on a transaction and return the updated transaction.
    pub async fn update(&self, id: u64, update: TransactionUpdate) -> Result<Transaction> {
        Transaction::update(&self.client, id, update).await
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        Transaction::delete(&self.client, id).await
    }
}
