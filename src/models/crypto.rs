//! Crypto holdings.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::client::LunchMoneyClient;
use crate::error::Result;
use crate::pagination::Page;
use crate::traits::{List, Update};
use crate::wire::Wire;

/// A cryptocurrency balance, either entered manually or synced from an
/// exchange or wallet.
///
/// Manual holdings are identified by `id`; synced holdings by
/// `zabo_account_id`.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CryptoHolding {
    pub id: Option<u64>,
    pub zabo_account_id: Option<u64>,
    pub source: CryptoSource,
    pub name: String,
    pub display_name: Option<String>,
    pub balance: Decimal,
    pub balance_as_of: Option<DateTime<Utc>>,
    /// Cryptocurrency symbol, e.g. "btc".
    pub currency: String,
    /// Sync status for synced holdings.
    pub status: Option<String>,
    pub institution_name: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Where a crypto holding's balance comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CryptoSource {
    Manual,
    Synced,
}

impl CryptoHolding {
    /// Check if this holding can be updated through the API.
    pub fn is_manual(&self) -> bool {
        self.source == CryptoSource::Manual
    }
}

impl Wire for CryptoHolding {}

/// Fields to change on a manually managed crypto holding.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CryptoUpdate {
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub institution_name: Option<String>,
    pub balance: Option<Decimal>,
    pub currency: Option<String>,
}

impl Wire for CryptoUpdate {}

#[derive(Debug, Deserialize)]
struct CryptoListResponse {
    crypto: Vec<CryptoHolding>,
}

#[async_trait]
impl List for CryptoHolding {
    type Query = ();

    #[tracing::instrument(skip(client, _query))]
    async fn list_page(
        client: &LunchMoneyClient,
        _query: &Self::Query,
        _offset: u32,
        _limit: u32,
    ) -> Result<Page<Self>> {
        let response = client.get("crypto").await?;
        let data: CryptoListResponse = LunchMoneyClient::decode(response).await?;
        Ok(Page::complete(data.crypto))
    }
}

#[async_trait]
impl Update for CryptoHolding {
    type Id = u64;
    type Params = CryptoUpdate;

    /// Only manual holdings can be updated; synced holdings answer 404.
    #[tracing::instrument(skip(client))]
    async fn update(client: &LunchMoneyClient, id: u64, params: Self::Params) -> Result<Self> {
        let response = client.put(&format!("crypto/manual/{id}"), &params).await?;
        LunchMoneyClient::decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_crypto_list_deserialize() {
        let json = r#"{"crypto": [
            {
                "zabo_account_id": 544,
                "source": "synced",
                "name": "Dogecoin",
                "display_name": null,
                "balance": "1.902383849000000000",
                "currency": "doge",
                "status": "active",
                "institution_name": "MetaMask",
                "created_at": "2021-01-12T00:32:47.000Z"
            },
            {
                "id": 152,
                "source": "manual",
                "name": "Ether",
                "balance": 0.5,
                "currency": "eth"
            }
        ]}"#;

        let data: CryptoListResponse = crate::wire::decode(json.as_bytes()).unwrap();
        assert_eq!(data.crypto.len(), 2);
        assert!(!data.crypto[0].is_manual());
        assert_eq!(data.crypto[0].balance, dec!(1.902383849));
        assert!(data.crypto[1].is_manual());
        assert_eq!(data.crypto[1].id, Some(152));
    }

    #[test]
    fn test_crypto_round_trip() {
        let holding = CryptoHolding {
            id: Some(9),
            zabo_account_id: Some(10),
            source: CryptoSource::Manual,
            name: "Bitcoin".to_string(),
            display_name: Some("Cold wallet".to_string()),
            balance: dec!(0.25),
            balance_as_of: Some(Utc.with_ymd_and_hms(2024, 2, 1, 9, 15, 0).unwrap()),
            currency: "btc".to_string(),
            status: Some("active".to_string()),
            institution_name: Some("Ledger".to_string()),
            created_at: Some(Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap()),
        };
        let bytes = holding.to_wire().unwrap();
        assert_eq!(CryptoHolding::from_wire(&bytes).unwrap(), holding);
    }

    #[test]
    fn test_crypto_update_body() {
        let update = CryptoUpdate {
            balance: Some(dec!(0.50)),
            ..Default::default()
        };
        let value: serde_json::Value = serde_json::from_slice(&update.to_wire().unwrap()).unwrap();
        assert_eq!(value, serde_json::json!({"balance": "0.50"}));
    }
}
