//! Per-resource clients and the [`LunchMoney`] facade.
//!
//! The facade owns one delegate per API resource. Every delegate wraps a
//! clone of the same [`LunchMoneyClient`], so they share one connection pool.

mod assets;
mod budgets;
mod crypto;
mod groups;
mod plaid_accounts;
mod recurring;
mod transactions;

pub use assets::AssetsApi;
pub use budgets::BudgetsApi;
pub use crypto::CryptoApi;
pub use groups::GroupsApi;
pub use plaid_accounts::PlaidAccountsApi;
pub use recurring::RecurringExpensesApi;
pub use transactions::TransactionsApi;

use crate::client::LunchMoneyClient;
use crate::error::Result;

/// Entry point to the Lunch Money API.
///
/// # Example
///
/// ```no_run
/// use lunchmoney::LunchMoney;
///
/// # async fn example() -> lunchmoney::Result<()> {
/// let lm = LunchMoney::from_env()?;
///
/// let group = lm.groups().group([10, 11]).await?;
/// println!("Grouped into {} ({} {})", group.id, group.amount, group.currency);
///
/// lm.groups().ungroup(group.id).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LunchMoney {
    client: LunchMoneyClient,
    transactions: TransactionsApi,
    groups: GroupsApi,
    budgets: BudgetsApi,
    assets: AssetsApi,
    crypto: CryptoApi,
    recurring_expenses: RecurringExpensesApi,
    plaid_accounts: PlaidAccountsApi,
}

impl LunchMoney {
    /// Build the facade around an existing client.
    pub fn new(client: LunchMoneyClient) -> Self {
        Self {
            transactions: TransactionsApi::new(client.clone()),
            groups: GroupsApi::new(client.clone()),
            budgets: BudgetsApi::new(client.clone()),
            assets: AssetsApi::new(client.clone()),
            crypto: CryptoApi::new(client.clone()),
            recurring_expenses: RecurringExpensesApi::new(client.clone()),
            plaid_accounts: PlaidAccountsApi::new(client.clone()),
            client,
        }
    }

    /// Build the facade from environment variables.
    ///
    /// See [`LunchMoneyClient::from_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if `LUNCHMONEY_ACCESS_TOKEN` is not set.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(LunchMoneyClient::from_env()?))
    }

    /// The underlying HTTP client.
    pub fn client(&self) -> &LunchMoneyClient {
        &self.client
    }

    pub fn transactions(&self) -> &TransactionsApi {
        &self.transactions
    }

    pub fn groups(&self) -> &GroupsApi {
        &self.groups
    }

    pub fn budgets(&self) -> &BudgetsApi {
        &self.budgets
    }

    pub fn assets(&self) -> &AssetsApi {
        &self.assets
    }

    pub fn crypto(&self) -> &CryptoApi {
        &self.crypto
    }

    pub fn recurring_expenses(&self) -> &RecurringExpensesApi {
        &self.recurring_expenses
    }

    pub fn plaid_accounts(&self) -> &PlaidAccountsApi {
        &self.plaid_accounts
    }
}

impl From<LunchMoneyClient> for LunchMoney {
    fn from(client: LunchMoneyClient) -> Self {
        Self::new(client)
    }
}
