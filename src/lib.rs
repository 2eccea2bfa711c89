//! Lunch Money API client library.
//!
//! A Rust library for the Lunch Money personal-finance REST API. Each
//! operation (Get, List, Create, Update, Delete) is a trait that entity
//! types implement, and the [`LunchMoney`] facade groups those operations
//! per resource.
//!
//! # Quick Start
//!
//! ```no_run
//! use lunchmoney::{LunchMoney, TransactionListQuery};
//!
//! #[tokio::main]
//! async fn main() -> lunchmoney::Result<()> {
//!     // Create client from environment variables
//!     let lm = LunchMoney::from_env()?;
//!
//!     // List this month's transactions
//!     let transactions = lm
//!         .transactions()
//!         .list_all(&TransactionListQuery::default())
//!         .await?;
//!     println!("Found {} transactions", transactions.len());
//!
//!     // Fold two transactions into one
//!     let group = lm.groups().group([10, 11]).await?;
//!     println!("Group {} totals {} {}", group.id, group.amount, group.currency);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`LunchMoneyClient`] sends authenticated requests and maps non-success
//!   statuses onto [`LunchMoneyError`] categories.
//! - [`Wire`] is the JSON marshaling boundary; decoding failures surface as
//!   [`DecodeError`].
//! - [`Get`], [`List`], [`Create`], [`Update`] and [`Delete`] are
//!   implemented by the model types each endpoint supports.
//! - [`LunchMoney`] holds one delegate per resource.
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `LUNCHMONEY_ACCESS_TOKEN` (required) - Your Lunch Money access token
//! - `LUNCHMONEY_API_URL` (optional) - Base URL (defaults to `https://api.lunchmoney.dev/v2`)

pub mod cli;
mod client;
mod error;
#[cfg(feature = "test-server")]
pub mod mock_server;
mod models;
mod output;
mod pagination;
mod resources;
mod traits;
mod wire;

// Re-export core types
pub use client::LunchMoneyClient;
pub use error::{DecodeError, LunchMoneyError, Result};
pub use output::{page_footer, PrettyPrint};
pub use pagination::{Page, PaginationParams};
pub use wire::Wire;

// Re-export traits
pub use traits::{Create, Delete, Get, List, Update, DEFAULT_PAGE_SIZE};

// Re-export the facade and its delegates
pub use resources::{
    AssetsApi, BudgetsApi, CryptoApi, GroupsApi, LunchMoney, PlaidAccountsApi,
    RecurringExpensesApi, TransactionsApi,
};

// Re-export models
pub use models::{
    // Transaction types
    InsertTransactionsRequest,
    InsertTransactionsResponse,
    NewTransaction,
    SkippedExternalId,
    Tag,
    Transaction,
    TransactionListQuery,
    TransactionStatus,
    TransactionSplit,
    TransactionUpdate,
    MIN_SPLIT_PARTS,
    // Group types
    GroupTransactionsRequest,
    MIN_GROUP_SIZE,
    // Budget types
    Budget,
    BudgetConfig,
    BudgetData,
    BudgetUpsert,
    CategoryGroupBudget,
    // Asset types
    Asset,
    AssetType,
    AssetUpdate,
    NewAsset,
    // Crypto types
    CryptoHolding,
    CryptoSource,
    CryptoUpdate,
    // Recurring expense types
    RecurringExpense,
    RecurringExpenseQuery,
    RecurringKind,
    RecurringSource,
    // Plaid account types
    PlaidAccount,
    PlaidAccountStatus,
};

// Re-export convenience functions
pub use models::{get_budgets, remove_budget, upsert_budget};
pub use models::{get_transaction_group, group_transactions, ungroup_transactions};
pub use models::get_transactions;
