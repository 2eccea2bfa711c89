//! Crypto resource.

use crate::client::LunchMoneyClient;
use crate::error::Result;
use crate::models::{CryptoHolding, CryptoUpdate};
use crate::traits::{List, Update};

/// Operations on `/crypto`.
#[derive(Debug, Clone)]
pub struct CryptoApi {
    client: LunchMoneyClient,
}

impl CryptoApi {
    pub(crate) fn new(client: LunchMoneyClient) -> Self {
        Self { client }
    }

    /// All crypto holdings, manual and synced.
    pub async fn list(&self) -> Result<Vec<CryptoHolding>> {
        CryptoHolding::list_all(&self.client, &()).await
    }

    /// Update a manually managed holding.
    pub async fn update(&self, id: u64, update: CryptoUpdate) -> Result<CryptoHolding> {
        CryptoHolding::update(&self.client, id, update).await
    }
}
