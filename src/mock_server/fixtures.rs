//! Test data fixtures for the mock server.
//!
//! Provides factory functions for creating realistic test data.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    Asset, AssetType, Budget, BudgetData, CryptoHolding, CryptoSource, PlaidAccount,
    PlaidAccountStatus, RecurringExpense, RecurringKind, RecurringSource, Tag, Transaction,
    TransactionStatus,
};

/// Collection of fixture factories for test data.
pub struct Fixtures;

fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn amount(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

impl Fixtures {
    // =========================================================================
    // Transaction Fixtures
    // =========================================================================

    /// Create a cleared transaction in US dollars.
    pub fn transaction(id: u64, date: NaiveDate, cents: i64, payee: &str) -> Transaction {
        let mut transaction = Transaction::new(id, date, amount(cents), "usd");
        transaction.payee = Some(payee.to_string());
        transaction
    }

    /// Create a transaction in a foreign currency with its primary-currency value.
    pub fn foreign_transaction(
        id: u64,
        date: NaiveDate,
        cents: i64,
        currency: &str,
        base_cents: i64,
        payee: &str,
    ) -> Transaction {
        let mut transaction = Transaction::new(id, date, amount(cents), currency);
        transaction.base_amount = Some(amount(base_cents));
        transaction.payee = Some(payee.to_string());
        transaction
    }

    /// Create an uncleared transaction.
    pub fn uncleared_transaction(id: u64, date: NaiveDate, cents: i64, payee: &str) -> Transaction {
        let mut transaction = Self::transaction(id, date, cents, payee);
        transaction.status = TransactionStatus::Uncleared;
        transaction
    }

    /// Create a tag.
    pub fn tag(id: u64, name: &str) -> Tag {
        Tag {
            id,
            name: name.to_string(),
        }
    }

    // =========================================================================
    // Account Fixtures
    // =========================================================================

    /// Create a manually managed account.
    pub fn asset(id: u64, kind: AssetType, name: &str, cents: i64) -> Asset {
        Asset {
            id,
            kind,
            subtype_name: None,
            name: name.to_string(),
            display_name: None,
            balance: amount(cents),
            balance_as_of: None,
            currency: "usd".to_string(),
            institution_name: None,
            closed_on: None,
            exclude_transactions: None,
            created_at: None,
        }
    }

    /// Create an active account linked through Plaid.
    pub fn plaid_account(id: u64, name: &str, kind: &str, cents: i64) -> PlaidAccount {
        PlaidAccount {
            id,
            date_linked: None,
            name: name.to_string(),
            display_name: None,
            kind: Some(kind.to_string()),
            subtype: None,
            mask: None,
            institution_name: None,
            status: PlaidAccountStatus::Active,
            balance: amount(cents),
            currency: "usd".to_string(),
            balance_last_update: None,
            limit: None,
            import_start_date: None,
            last_import: None,
        }
    }

    /// Create a manual crypto holding.
    pub fn manual_crypto(id: u64, name: &str, currency: &str, balance: Decimal) -> CryptoHolding {
        CryptoHolding {
            id: Some(id),
            zabo_account_id: None,
            source: CryptoSource::Manual,
            name: name.to_string(),
            display_name: None,
            balance,
            balance_as_of: None,
            currency: currency.to_string(),
            status: Some("active".to_string()),
            institution_name: None,
            created_at: None,
        }
    }

    /// Create a crypto holding synced from an exchange.
    pub fn synced_crypto(
        zabo_account_id: u64,
        name: &str,
        currency: &str,
        balance: Decimal,
    ) -> CryptoHolding {
        CryptoHolding {
            id: None,
            zabo_account_id: Some(zabo_account_id),
            source: CryptoSource::Synced,
            ..Self::manual_crypto(0, name, currency, balance)
        }
    }

    // =========================================================================
    // Budget Fixtures
    // =========================================================================

    /// Create a category budget with one budgeted month.
    pub fn budget(
        category_id: u64,
        name: &str,
        month: NaiveDate,
        budget_cents: i64,
        spent_cents: i64,
    ) -> Budget {
        let mut data = BTreeMap::new();
        data.insert(
            month,
            BudgetData {
                budget_amount: Some(amount(budget_cents)),
                budget_currency: Some("usd".to_string()),
                budget_in_base: Some(amount(budget_cents)),
                spent_in_base: amount(spent_cents),
                num_transactions: 1,
            },
        );

        Budget {
            category_name: name.to_string(),
            category_id: Some(category_id),
            category_group_name: None,
            group_id: None,
            is_group: Some(false),
            is_income: false,
            exclude_from_budget: false,
            exclude_from_totals: false,
            data,
            config: None,
        }
    }

    /// Create a monthly recurring expense.
    pub fn recurring_expense(
        id: u64,
        payee: &str,
        cents: i64,
        billing_date: NaiveDate,
    ) -> RecurringExpense {
        RecurringExpense {
            id,
            start_date: Some(billing_date),
            end_date: None,
            cadence: "monthly".to_string(),
            payee: payee.to_string(),
            amount: amount(cents),
            currency: "usd".to_string(),
            description: None,
            billing_date,
            kind: RecurringKind::Cleared,
            original_name: None,
            source: RecurringSource::Manual,
            plaid_account_id: None,
            asset_id: None,
            transaction_id: None,
            category_id: None,
            created_at: None,
        }
    }

    // =========================================================================
    // Scenario Builders
    // =========================================================================

    /// Create a default set of test data for common scenarios.
    pub fn default_scenario() -> DefaultScenario {
        DefaultScenario::new()
    }
}

/// A complete test scenario with related entities.
///
/// Transactions 1, 2 and 3 are a dinner's worth of US dollar charges,
/// 10 and 11 sum to 8.00 USD, and 20 is a euro charge. Tags 1 and 2 can
/// be attached by id.
pub struct DefaultScenario {
    pub transactions: Vec<Transaction>,
    pub assets: Vec<Asset>,
    pub budgets: Vec<Budget>,
    pub crypto: Vec<CryptoHolding>,
    pub recurring_expenses: Vec<RecurringExpense>,
    pub plaid_accounts: Vec<PlaidAccount>,
    pub tags: Vec<Tag>,
}

impl DefaultScenario {
    fn new() -> Self {
        let transactions = vec![
            Fixtures::transaction(1, day(2024, 1, 5), 4550, "Trattoria"),
            Fixtures::transaction(2, day(2024, 1, 5), 1200, "Trattoria"),
            Fixtures::uncleared_transaction(3, day(2024, 1, 6), 900, "Taxi"),
            Fixtures::transaction(10, day(2024, 1, 10), 500, "Bakery"),
            Fixtures::transaction(11, day(2024, 1, 11), 300, "Bakery"),
            Fixtures::foreign_transaction(20, day(2024, 1, 15), 1000, "eur", 1100, "Boulangerie"),
        ];

        let assets = vec![
            Fixtures::asset(101, AssetType::Cash, "Checking", 250_000),
            Fixtures::asset(102, AssetType::Credit, "Travel Card", 43_210),
        ];

        let budgets = vec![
            Fixtures::budget(201, "Groceries", day(2024, 1, 1), 40_000, 12_345),
            Fixtures::budget(202, "Restaurants", day(2024, 1, 1), 15_000, 5_750),
        ];

        let crypto = vec![
            Fixtures::manual_crypto(301, "Cold Wallet", "btc", Decimal::new(5, 1)),
            Fixtures::synced_crypto(302, "Exchange", "eth", Decimal::new(125, 2)),
        ];

        let recurring_expenses = vec![Fixtures::recurring_expense(
            401,
            "Streaming Service",
            1599,
            day(2024, 1, 20),
        )];

        let plaid_accounts = vec![
            Fixtures::plaid_account(501, "Everyday Checking", "depository", 120_101),
            Fixtures::plaid_account(502, "Rewards Card", "credit", -35_000),
        ];

        let tags = vec![Fixtures::tag(1, "dining"), Fixtures::tag(2, "travel")];

        Self {
            transactions,
            assets,
            budgets,
            crypto,
            recurring_expenses,
            plaid_accounts,
            tags,
        }
    }
}
