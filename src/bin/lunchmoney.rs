//! Lunch Money API CLI binary.
//!
//! A command-line interface for interacting with the Lunch Money API.

use clap::Parser;
use lunchmoney::cli::{Cli, Command, Entity};
use lunchmoney::{
    page_footer, Asset, Budget, CryptoHolding, GroupTransactionsRequest, LunchMoney,
    LunchMoneyClient, LunchMoneyError, Page, PlaidAccount, PrettyPrint, RecurringExpense,
    RecurringExpenseQuery, Transaction, TransactionListQuery, DEFAULT_PAGE_SIZE,
};
use serde::Serialize;
use std::process::ExitCode;
use tabled::{Table, Tabled};
use tracing::Level;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let Some(token) = cli.token.as_deref() else {
        eprintln!("Error: no access token given");
        eprintln!("Hint: Set LUNCHMONEY_ACCESS_TOKEN environment variable or pass --token");
        return ExitCode::FAILURE;
    };

    let client = match LunchMoneyClient::new(token, &cli.api_url) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&LunchMoney::new(client), cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if e.is_retryable() {
                eprintln!("Hint: This error is temporary; try again shortly");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(lm: &LunchMoney, cli: Cli) -> lunchmoney::Result<()> {
    match cli.command {
        Command::Get { entity, id } => handle_get(lm, entity, id, cli.json).await,
        Command::List {
            entity,
            start_date,
            end_date,
            offset,
            limit,
        } => {
            let query = TransactionListQuery {
                start_date,
                end_date,
                ..Default::default()
            };
            handle_list(lm, entity, query, offset, limit, cli.json).await
        }
        Command::Group {
            ids,
            payee,
            date,
            notes,
        } => {
            let request = GroupTransactionsRequest {
                payee,
                date,
                notes,
                ..GroupTransactionsRequest::new(ids)
            };
            let group = lm.groups().group_with(request).await?;
            output_single(&group, cli.json)
        }
        Command::Ungroup { id } => {
            lm.groups().ungroup(id).await?;
            if cli.json {
                println!("{}", serde_json::json!({ "ungrouped": id }));
            } else {
                println!("Ungrouped transaction group #{id}");
            }
            Ok(())
        }
    }
}

async fn handle_get(
    lm: &LunchMoney,
    entity: Entity,
    id: u64,
    json: bool,
) -> lunchmoney::Result<()> {
    match entity {
        Entity::Transaction => {
            let transaction = lm.transactions().get(id).await?;
            output_single(&transaction, json)
        }
        Entity::Group => {
            let group = lm.groups().get(id).await?;
            output_single(&group, json)
        }
        _ => {
            eprintln!("Error: Only transactions and groups can be retrieved individually");
            eprintln!("Hint: Use 'lunchmoney list <entity>'");
            Err(LunchMoneyError::validation(
                "get is only supported for transactions and groups",
            ))
        }
    }
}

async fn handle_list(
    lm: &LunchMoney,
    entity: Entity,
    query: TransactionListQuery,
    offset: Option<u32>,
    limit: Option<u32>,
    json: bool,
) -> lunchmoney::Result<()> {
    match entity {
        Entity::Transaction | Entity::Group => {
            let page = lm
                .transactions()
                .list_page(
                    &query,
                    offset.unwrap_or(0),
                    limit.unwrap_or(DEFAULT_PAGE_SIZE),
                )
                .await?;
            let page = if entity == Entity::Group {
                page.filter(Transaction::is_group)
            } else {
                page
            };
            output_page(&page, json, |x| TransactionRow::from(x))
        }
        Entity::Budget => {
            let (Some(start), Some(end)) = (query.start_date, query.end_date) else {
                return Err(LunchMoneyError::validation(
                    "--start-date and --end-date are required for budgets",
                ));
            };
            let budgets = lm.budgets().summary(start, end).await?;
            output_list(&budgets, json, |x| BudgetRow::from(x))
        }
        Entity::Asset => {
            let assets = lm.assets().list().await?;
            output_list(&assets, json, |x| AssetRow::from(x))
        }
        Entity::Crypto => {
            let holdings = lm.crypto().list().await?;
            output_list(&holdings, json, |x| CryptoRow::from(x))
        }
        Entity::RecurringExpense => {
            let query = RecurringExpenseQuery {
                start_date: query.start_date,
                ..Default::default()
            };
            let expenses = lm.recurring_expenses().list(&query).await?;
            output_list(&expenses, json, |x| RecurringRow::from(x))
        }
        Entity::PlaidAccount => {
            let accounts = lm.plaid_accounts().list().await?;
            output_list(&accounts, json, |x| PlaidAccountRow::from(x))
        }
    }
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> lunchmoney::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_list<T, R, F>(items: &[T], json: bool, to_row: F) -> lunchmoney::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
    }
    Ok(())
}

fn output_page<T, R, F>(page: &Page<T>, json: bool, to_row: F) -> lunchmoney::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    output_list(&page.items, json, to_row)?;
    if !json {
        println!("\n{}", page_footer(page));
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct TransactionRow {
    id: u64,
    date: String,
    payee: String,
    amount: String,
    status: String,
    group: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id,
            date: t.date.to_string(),
            payee: t.payee.clone().unwrap_or_default(),
            amount: format!("{} {}", t.amount, t.currency.to_uppercase()),
            status: t.status.to_string(),
            group: if t.is_group() {
                format!("{} children", t.children.len())
            } else {
                String::new()
            },
        }
    }
}

#[derive(Tabled)]
struct BudgetRow {
    category: String,
    months: usize,
    spent: String,
    income: bool,
}

impl From<&Budget> for BudgetRow {
    fn from(b: &Budget) -> Self {
        Self {
            category: b.category_name.clone(),
            months: b.data.len(),
            spent: b.total_spent().to_string(),
            income: b.is_income,
        }
    }
}

#[derive(Tabled)]
struct AssetRow {
    id: u64,
    name: String,
    #[tabled(rename = "type")]
    kind: String,
    balance: String,
}

impl From<&Asset> for AssetRow {
    fn from(a: &Asset) -> Self {
        Self {
            id: a.id,
            name: a.label().to_string(),
            kind: a.kind.to_string(),
            balance: format!("{} {}", a.balance, a.currency.to_uppercase()),
        }
    }
}

#[derive(Tabled)]
struct CryptoRow {
    id: String,
    name: String,
    balance: String,
    source: String,
}

impl From<&CryptoHolding> for CryptoRow {
    fn from(c: &CryptoHolding) -> Self {
        Self {
            id: c
                .id
                .or(c.zabo_account_id)
                .map(|id| id.to_string())
                .unwrap_or_default(),
            name: c.display_name.clone().unwrap_or_else(|| c.name.clone()),
            balance: format!("{} {}", c.balance, c.currency.to_uppercase()),
            source: if c.is_manual() { "manual" } else { "synced" }.to_string(),
        }
    }
}

#[derive(Tabled)]
struct RecurringRow {
    id: u64,
    payee: String,
    amount: String,
    cadence: String,
    billing_date: String,
}

impl From<&RecurringExpense> for RecurringRow {
    fn from(r: &RecurringExpense) -> Self {
        Self {
            id: r.id,
            payee: r.payee.clone(),
            amount: format!("{} {}", r.amount, r.currency.to_uppercase()),
            cadence: r.cadence.clone(),
            billing_date: r.billing_date.to_string(),
        }
    }
}

#[derive(Tabled)]
struct PlaidAccountRow {
    id: u64,
    name: String,
    institution: String,
    status: String,
    balance: String,
}

impl From<&PlaidAccount> for PlaidAccountRow {
    fn from(a: &PlaidAccount) -> Self {
        Self {
            id: a.id,
            name: a.label().to_string(),
            institution: a.institution_name.clone().unwrap_or_default(),
            status: a.status.to_string(),
            balance: format!("{} {}", a.balance, a.currency.to_uppercase()),
        }
    }
}
