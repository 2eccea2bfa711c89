//! Assets resource.

use crate::client::LunchMoneyClient;
use crate::error::Result;
use crate::models::{Asset, AssetUpdate, NewAsset};
use crate::traits::{Create, List, Update};

/// Operations on `/assets`.
#[derive(Debug, Clone)]
pub struct AssetsApi {
    client: LunchMoneyClient,
}

impl AssetsApi {
    pub(crate) fn new(client: LunchMoneyClient) -> Self {
        Self { client }
    }

    /// All manually managed accounts.
    pub async fn list(&self) -> Result<Vec<Asset>> {
        Asset::list_all(&self.client, &()).await
    }

    pub async fn create(&self, asset: NewAsset) -> Result<Asset> {
        Asset::create(&self.client, asset).await
    }

    pub async fn update(&self, id: u64, update: AssetUpdate) -> Result<Asset> {
        Asset::update(&self.client, id, update).await
    }
}
