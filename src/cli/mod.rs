//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the
//! lunchmoney binary.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

/// Lunch Money API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "lunchmoney", about = "Lunch Money API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log requests and responses to stderr.
    #[arg(long, short, global = true, default_value = "false")]
    pub verbose: bool,

    /// Lunch Money access token.
    #[arg(long, env = "LUNCHMONEY_ACCESS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Base URL of the Lunch Money API.
    #[arg(
        long,
        env = "LUNCHMONEY_API_URL",
        default_value = "https://api.lunchmoney.dev/v2"
    )]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity by ID.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// The entity ID.
        id: u64,
    },

    /// List entities with optional filtering and pagination.
    List {
        /// The type of entity to list.
        entity: Entity,

        /// Earliest date (YYYY-MM-DD).
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Latest date (YYYY-MM-DD).
        #[arg(long)]
        end_date: Option<NaiveDate>,

        /// Number of items to skip.
        #[arg(long)]
        offset: Option<u32>,

        /// Number of items per page.
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Group two or more transactions into one.
    Group {
        /// IDs of the transactions to group.
        #[arg(required = true, num_args = 1..)]
        ids: Vec<u64>,

        /// Payee for the group transaction.
        #[arg(long)]
        payee: Option<String>,

        /// Date for the group transaction (YYYY-MM-DD).
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Notes for the group transaction.
        #[arg(long)]
        notes: Option<String>,
    },

    /// Dissolve a transaction group.
    Ungroup {
        /// ID of the group transaction.
        id: u64,
    },
}

/// Entity types that can be operated on.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    /// A transaction.
    #[value(alias = "transactions")]
    Transaction,
    /// A transaction group.
    #[value(alias = "groups")]
    Group,
    /// A category budget summary.
    #[value(alias = "budgets")]
    Budget,
    /// A manually managed account.
    #[value(alias = "assets")]
    Asset,
    /// A crypto holding.
    Crypto,
    /// A recurring expense.
    #[value(alias = "recurring-expenses", alias = "recurring")]
    RecurringExpense,
    /// An account synced through Plaid.
    #[value(alias = "plaid-accounts", alias = "plaid")]
    PlaidAccount,
}
