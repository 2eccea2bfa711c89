//! Asset (manually managed account) model and trait implementations.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::client::LunchMoneyClient;
use crate::error::Result;
use crate::pagination::Page;
use crate::traits::{Create, List, Update};
use crate::wire::Wire;

/// A manually managed account.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: u64,

    /// Primary account type.
    #[serde(rename = "type_name")]
    pub kind: AssetType,

    /// Optional finer-grained type (e.g. "retirement", "checking").
    pub subtype_name: Option<String>,

    pub name: String,

    /// Name shown in the UI, if different from `name`.
    pub display_name: Option<String>,

    /// Current balance in `currency`.
    pub balance: Decimal,

    /// When the balance was last updated.
    pub balance_as_of: Option<DateTime<Utc>>,

    pub currency: String,

    pub institution_name: Option<String>,

    /// Date the account was closed.
    pub closed_on: Option<NaiveDate>,

    /// Whether transactions may no longer be assigned to this account.
    pub exclude_transactions: Option<bool>,

    pub created_at: Option<DateTime<Utc>>,
}

/// Account types supported for manually managed accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    #[serde(rename = "cash")]
    Cash,
    #[serde(rename = "credit")]
    Credit,
    #[serde(rename = "investment")]
    Investment,
    #[serde(rename = "real estate")]
    RealEstate,
    #[serde(rename = "loan")]
    Loan,
    #[serde(rename = "vehicle")]
    Vehicle,
    #[serde(rename = "cryptocurrency")]
    Cryptocurrency,
    #[serde(rename = "employee compensation")]
    EmployeeCompensation,
    #[serde(rename = "other liability")]
    OtherLiability,
    #[serde(rename = "other asset")]
    OtherAsset,
}

impl AssetType {
    /// Whether balances of this type count against net worth.
    pub fn is_liability(self) -> bool {
        matches!(self, Self::Credit | Self::Loan | Self::OtherLiability)
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Cash => "cash",
            Self::Credit => "credit",
            Self::Investment => "investment",
            Self::RealEstate => "real estate",
            Self::Loan => "loan",
            Self::Vehicle => "vehicle",
            Self::Cryptocurrency => "cryptocurrency",
            Self::EmployeeCompensation => "employee compensation",
            Self::OtherLiability => "other liability",
            Self::OtherAsset => "other asset",
        };
        f.write_str(s)
    }
}

impl Asset {
    /// The name to show to a user.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Check if the account has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed_on.is_some()
    }
}

impl Wire for Asset {}

/// A manually managed account to create.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAsset {
    #[serde(rename = "type_name")]
    pub kind: AssetType,
    pub subtype_name: Option<String>,
    pub name: String,
    pub display_name: Option<String>,
    pub balance: Decimal,
    pub balance_as_of: Option<DateTime<Utc>>,
    /// Defaults to the user's primary currency.
    pub currency: Option<String>,
    pub institution_name: Option<String>,
    pub closed_on: Option<NaiveDate>,
    pub exclude_transactions: Option<bool>,
}

impl NewAsset {
    /// An account with only the required fields set.
    pub fn new(kind: AssetType, name: impl Into<String>, balance: Decimal) -> Self {
        Self {
            kind,
            subtype_name: None,
            name: name.into(),
            display_name: None,
            balance,
            balance_as_of: None,
            currency: None,
            institution_name: None,
            closed_on: None,
            exclude_transactions: None,
        }
    }
}

impl Wire for NewAsset {}

/// Fields to change on an existing account.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetUpdate {
    #[serde(rename = "type_name")]
    pub kind: Option<AssetType>,
    pub subtype_name: Option<String>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub balance: Option<Decimal>,
    pub balance_as_of: Option<DateTime<Utc>>,
    pub currency: Option<String>,
    pub institution_name: Option<String>,
    pub closed_on: Option<NaiveDate>,
    pub exclude_transactions: Option<bool>,
}

impl Wire for AssetUpdate {}

#[derive(Debug, Deserialize)]
struct AssetListResponse {
    assets: Vec<Asset>,
}

#[async_trait]
impl List for Asset {
    type Query = ();

    /// The assets endpoint is not paginated; the whole collection is
    /// returned as one complete page.
    #[tracing::instrument(skip(client, _query))]
    async fn list_page(
        client: &LunchMoneyClient,
        _query: &Self::Query,
        _offset: u32,
        _limit: u32,
    ) -> Result<Page<Self>> {
        let response = client.get("assets").await?;
        let data: AssetListResponse = LunchMoneyClient::decode(response).await?;
        Ok(Page::complete(data.assets))
    }
}

#[async_trait]
impl Create for Asset {
    type Params = NewAsset;
    type Output = Asset;

    #[tracing::instrument(skip(client))]
    async fn create(client: &LunchMoneyClient, params: Self::Params) -> Result<Self::Output> {
        let response = client.post("assets", &params).await?;
        LunchMoneyClient::decode(response).await
    }
}

#[async_trait]
impl Update for Asset {
    type Id = u64;
    type Params = AssetUpdate;

    #[tracing::instrument(skip(client))]
    async fn update(client: &LunchMoneyClient, id: u64, params: Self::Params) -> Result<Self> {
        let response = client.put(&format!("assets/{id}"), &params).await?;
        LunchMoneyClient::decode(response).await
    }
}
