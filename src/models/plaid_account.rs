//! Accounts synced through Plaid.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::client::LunchMoneyClient;
use crate::error::Result;
use crate::pagination::Page;
use crate::traits::List;
use crate::wire::Wire;

/// A bank, credit or investment account linked through Plaid.
///
/// These accounts are read-only through the API; their balances and
/// transactions are imported by the sync.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaidAccount {
    pub id: u64,
    /// Date the account was first linked.
    pub date_linked: Option<NaiveDate>,
    /// Name given by the institution.
    pub name: String,
    /// Name chosen by the user.
    pub display_name: Option<String>,
    /// Plaid account type, e.g. "credit" or "depository".
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Plaid account subtype, e.g. "checking".
    pub subtype: Option<String>,
    /// Last digits of the account number.
    pub mask: Option<String>,
    pub institution_name: Option<String>,
    pub status: PlaidAccountStatus,
    pub balance: Decimal,
    pub currency: String,
    pub balance_last_update: Option<DateTime<Utc>>,
    /// Credit limit, set on credit accounts.
    pub limit: Option<Decimal>,
    /// Earliest date transactions are imported from.
    pub import_start_date: Option<NaiveDate>,
    pub last_import: Option<DateTime<Utc>>,
}

/// Sync state of a Plaid account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaidAccountStatus {
    Active,
    Inactive,
    /// The user has to log in to the institution again.
    Relink,
    Syncing,
    Error,
    #[serde(rename = "not found")]
    NotFound,
    #[serde(rename = "not supported")]
    NotSupported,
}

impl fmt::Display for PlaidAccountStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Relink => "relink",
            Self::Syncing => "syncing",
            Self::Error => "error",
            Self::NotFound => "not found",
            Self::NotSupported => "not supported",
        };
        f.write_str(s)
    }
}

impl PlaidAccount {
    /// The display name if set, otherwise the institution's name.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Check if the account is importing transactions normally.
    pub fn is_active(&self) -> bool {
        self.status == PlaidAccountStatus::Active
    }
}

impl Wire for PlaidAccount {}

#[derive(Debug, Deserialize)]
struct PlaidAccountListResponse {
    plaid_accounts: Vec<PlaidAccount>,
}

#[async_trait]
impl List for PlaidAccount {
    type Query = ();

    #[tracing::instrument(skip(client, _query))]
    async fn list_page(
        client: &LunchMoneyClient,
        _query: &Self::Query,
        _offset: u32,
        _limit: u32,
    ) -> Result<Page<Self>> {
        let response = client.get("plaid_accounts").await?;
        let data: PlaidAccountListResponse = LunchMoneyClient::decode(response).await?;
        Ok(Page::complete(data.plaid_accounts))
    }
}
