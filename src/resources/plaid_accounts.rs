//! Plaid accounts resource.

use crate::client::LunchMoneyClient;
use crate::error::Result;
use crate::models::PlaidAccount;
use crate::traits::List;

/// Operations on `/plaid_accounts`.
#[derive(Debug, Clone)]
pub struct PlaidAccountsApi {
    client: LunchMoneyClient,
}

impl PlaidAccountsApi {
    pub(crate) fn new(client: LunchMoneyClient) -> Self {
        Self { client }
    }

    /// All accounts linked through Plaid.
    pub async fn list(&self) -> Result<Vec<PlaidAccount>> {
        PlaidAccount::list_all(&self.client, &()).await
    }
}
