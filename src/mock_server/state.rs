//! Mock server state management.
//!
//! Provides the in-memory data store for the mock Lunch Money API server,
//! including the grouping rules the real service enforces.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;

use crate::{
    Asset, AssetUpdate, Budget, CryptoHolding, CryptoUpdate, GroupTransactionsRequest, NewAsset,
    NewTransaction, PlaidAccount, RecurringExpense, Tag, Transaction, TransactionListQuery,
    TransactionSplit, TransactionStatus, TransactionUpdate, MIN_GROUP_SIZE, MIN_SPLIT_PARTS,
};

/// Why the mock store refused an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Maps to HTTP 400.
    Invalid(String),
    /// Maps to HTTP 404.
    NotFound(String),
}

/// Shared state for the mock server.
///
/// This struct holds all the mock data that the server will serve.
/// It's wrapped in `Arc<RwLock<_>>` for concurrent access.
#[derive(Debug)]
pub struct MockState {
    /// Transactions indexed by ID, including groups and grouped children.
    pub transactions: BTreeMap<u64, Transaction>,

    /// Budget summaries served for any date range.
    pub budgets: Vec<Budget>,

    /// Assets indexed by ID.
    pub assets: BTreeMap<u64, Asset>,

    /// Crypto holdings.
    pub crypto: Vec<CryptoHolding>,

    /// Recurring expenses.
    pub recurring_expenses: Vec<RecurringExpense>,

    /// Accounts linked through Plaid.
    pub plaid_accounts: Vec<PlaidAccount>,

    /// Tags that `tag_ids` in requests may refer to, indexed by ID.
    pub tags: BTreeMap<u64, Tag>,

    /// Currency used for groups whose children mix currencies.
    pub primary_currency: String,

    /// Optional authentication token. If set, requests must include this token.
    pub required_token: Option<String>,

    next_id: u64,
}

impl Default for MockState {
    fn default() -> Self {
        Self {
            transactions: BTreeMap::new(),
            budgets: Vec::new(),
            assets: BTreeMap::new(),
            crypto: Vec::new(),
            recurring_expenses: Vec::new(),
            plaid_accounts: Vec::new(),
            tags: BTreeMap::new(),
            primary_currency: "usd".to_string(),
            required_token: None,
            next_id: 1000,
        }
    }
}

impl MockState {
    /// Create a new empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state wrapped in Arc<RwLock> for sharing.
    pub fn shared(self) -> Arc<RwLock<Self>> {
        Arc::new(RwLock::new(self))
    }

    /// Add a transaction to the state.
    pub fn with_transaction(mut self, transaction: Transaction) -> Self {
        self.next_id = self.next_id.max(transaction.id + 1);
        self.transactions.insert(transaction.id, transaction);
        self
    }

    /// Add a budget summary to the state.
    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budgets.push(budget);
        self
    }

    /// Add an asset to the state.
    pub fn with_asset(mut self, asset: Asset) -> Self {
        self.next_id = self.next_id.max(asset.id + 1);
        self.assets.insert(asset.id, asset);
        self
    }

    /// Add a crypto holding to the state.
    pub fn with_crypto(mut self, holding: CryptoHolding) -> Self {
        self.crypto.push(holding);
        self
    }

    /// Add a recurring expense to the state.
    pub fn with_recurring_expense(mut self, expense: RecurringExpense) -> Self {
        self.recurring_expenses.push(expense);
        self
    }

    /// Add a Plaid account to the state.
    pub fn with_plaid_account(mut self, account: PlaidAccount) -> Self {
        self.plaid_accounts.push(account);
        self
    }

    /// Register a tag that requests can attach by ID.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tags.insert(tag.id, tag);
        self
    }

    /// Set the user's primary currency.
    pub fn with_primary_currency(mut self, currency: &str) -> Self {
        self.primary_currency = currency.to_lowercase();
        self
    }

    /// Set the required authentication token.
    pub fn with_required_token(mut self, token: &str) -> Self {
        self.required_token = Some(token.to_string());
        self
    }

    /// Check a bearer token against the required one, if any.
    pub fn is_authorized(&self, bearer: Option<&str>) -> bool {
        match &self.required_token {
            Some(required) => bearer == Some(required.as_str()),
            None => true,
        }
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Look up the tags for a request's `tag_ids`.
    fn resolve_tags(&self, ids: &[u64]) -> Result<Vec<Tag>, StateError> {
        ids.iter()
            .map(|id| {
                self.tags
                    .get(id)
                    .cloned()
                    .ok_or_else(|| StateError::Invalid(format!("Tag {id} does not exist")))
            })
            .collect()
    }

    /// Check if a transaction has been split into parts.
    fn is_split(&self, id: u64) -> bool {
        self.transactions.values().any(|t| t.parent_id == Some(id))
    }

    /// Get a transaction by ID, with `children` filled in for groups and
    /// split transactions.
    pub fn get_transaction(&self, id: u64) -> Option<Transaction> {
        self.transactions.get(&id).map(|t| self.with_children(t))
    }

    fn with_children(&self, transaction: &Transaction) -> Transaction {
        let mut view = transaction.clone();
        let id = view.id;
        view.children = if view.is_group() {
            self.transactions
                .values()
                .filter(|c| c.group_id == Some(id))
                .cloned()
                .collect()
        } else {
            self.transactions
                .values()
                .filter(|c| c.parent_id == Some(id))
                .cloned()
                .collect()
        };
        view
    }

    /// List transactions the way the standard listing endpoint does.
    ///
    /// Grouped children are left out; their group is listed instead. Split
    /// transactions are replaced by their parts.
    pub fn list_transactions(&self, query: &TransactionListQuery) -> Vec<Transaction> {
        self.transactions
            .values()
            .filter(|t| !t.is_grouped_child())
            .filter(|t| !self.is_split(t.id))
            .filter(|t| query.start_date.map_or(true, |d| t.date >= d))
            .filter(|t| query.end_date.map_or(true, |d| t.date <= d))
            .filter(|t| query.status.map_or(true, |s| t.status == s))
            .filter(|t| query.category_id.map_or(true, |c| t.category_id == Some(c)))
            .filter(|t| query.asset_id.map_or(true, |a| t.asset_id == Some(a)))
            .filter(|t| {
                query
                    .plaid_account_id
                    .map_or(true, |p| t.plaid_account_id == Some(p))
            })
            .map(|t| self.with_children(t))
            .collect()
    }

    /// Insert new transactions, skipping duplicate external ids.
    ///
    /// Returns the created transactions and, for each skipped request entry,
    /// its index, the existing transaction id and the external id. Nothing is
    /// inserted when any entry refers to an unknown tag.
    pub fn insert_transactions(
        &mut self,
        new: Vec<NewTransaction>,
    ) -> Result<(Vec<Transaction>, Vec<(u32, u64, String)>), StateError> {
        let tags = new
            .iter()
            .map(|item| self.resolve_tags(&item.tag_ids))
            .collect::<Result<Vec<_>, _>>()?;

        let mut created = Vec::new();
        let mut skipped = Vec::new();

        for (index, (item, tags)) in new.into_iter().zip(tags).enumerate() {
            if let Some(external_id) = item.external_id.as_deref() {
                let existing = self
                    .transactions
                    .values()
                    .find(|t| t.external_id.as_deref() == Some(external_id));
                if let Some(existing) = existing {
                    skipped.push((
                        u32::try_from(index).unwrap_or(u32::MAX),
                        existing.id,
                        external_id.to_string(),
                    ));
                    continue;
                }
            }

            let id = self.allocate_id();
            let currency = item
                .currency
                .unwrap_or_else(|| self.primary_currency.clone());
            let mut transaction = Transaction::new(id, item.date, item.amount, currency);
            transaction.payee = item.payee;
            transaction.category_id = item.category_id;
            transaction.asset_id = item.asset_id;
            transaction.recurring_expense_id = item.recurring_expense_id;
            transaction.notes = item.notes;
            transaction.status = item.status.unwrap_or(TransactionStatus::Uncleared);
            transaction.external_id = item.external_id;
            transaction.tags = tags;
            transaction.created_at = Some(Utc::now());

            self.transactions.insert(id, transaction.clone());
            created.push(transaction);
        }

        Ok((created, skipped))
    }

    /// Apply an update to a transaction.
    ///
    /// With `debit_as_negative`, negative amounts in the update are debits
    /// and are stored negated. Unless `skip_balance_update` is explicitly
    /// false, the linked asset's balance is left alone. A `split` replaces
    /// the transaction in listings with its parts.
    pub fn update_transaction(
        &mut self,
        id: u64,
        update: TransactionUpdate,
    ) -> Result<Transaction, StateError> {
        let current = self
            .transactions
            .get(&id)
            .ok_or_else(|| StateError::NotFound(format!("Transaction {id} not found")))?;

        let sign = if update.debit_as_negative.unwrap_or(false) {
            Decimal::NEGATIVE_ONE
        } else {
            Decimal::ONE
        };
        let amount = update.amount.map_or(current.amount, |a| a * sign);
        let previous_amount = current.amount;
        let asset_id = update.asset_id.or(current.asset_id);

        let tags = update
            .tag_ids
            .as_deref()
            .map(|ids| self.resolve_tags(ids))
            .transpose()?;
        let parts = match update.split.as_deref() {
            Some(parts) => Some(self.check_split(id, amount, parts, sign)?),
            None => None,
        };

        let transaction = self
            .transactions
            .get_mut(&id)
            .ok_or_else(|| StateError::NotFound(format!("Transaction {id} not found")))?;

        if let Some(date) = update.date {
            transaction.date = date;
        }
        transaction.amount = amount;
        if let Some(currency) = update.currency {
            transaction.currency = currency;
        }
        if let Some(payee) = update.payee {
            transaction.payee = Some(payee);
        }
        if let Some(category_id) = update.category_id {
            transaction.category_id = Some(category_id);
        }
        if let Some(notes) = update.notes {
            transaction.notes = Some(notes);
        }
        if let Some(status) = update.status {
            transaction.status = status;
        }
        transaction.asset_id = asset_id;
        if let Some(recurring) = update.recurring_expense_id {
            transaction.recurring_expense_id = Some(recurring);
        }
        if let Some(external_id) = update.external_id {
            transaction.external_id = Some(external_id);
        }
        if let Some(tags) = tags {
            transaction.tags = tags;
        }
        transaction.updated_at = Some(Utc::now());
        let parent = transaction.clone();

        if update.skip_balance_update == Some(false) {
            if let Some(asset) = asset_id.and_then(|a| self.assets.get_mut(&a)) {
                asset.balance -= amount - previous_amount;
                asset.balance_as_of = Some(Utc::now());
            }
        }

        for part in parts.unwrap_or_default() {
            let part_id = self.allocate_id();
            let mut child = Transaction::new(
                part_id,
                part.date.unwrap_or(parent.date),
                part.amount,
                parent.currency.clone(),
            );
            child.payee = part.payee.or_else(|| parent.payee.clone());
            child.category_id = part.category_id.or(parent.category_id);
            child.notes = part.notes;
            child.status = parent.status;
            child.asset_id = parent.asset_id;
            child.plaid_account_id = parent.plaid_account_id;
            child.parent_id = Some(id);
            child.created_at = Some(Utc::now());
            self.transactions.insert(part_id, child);
        }

        self.get_transaction(id)
            .ok_or_else(|| StateError::NotFound(format!("Transaction {id} not found")))
    }

    /// Validate a split of transaction `id` and return its parts with
    /// amounts in stored sign.
    fn check_split(
        &self,
        id: u64,
        amount: Decimal,
        parts: &[TransactionSplit],
        sign: Decimal,
    ) -> Result<Vec<TransactionSplit>, StateError> {
        let transaction = self
            .transactions
            .get(&id)
            .ok_or_else(|| StateError::NotFound(format!("Transaction {id} not found")))?;

        if transaction.is_group() || transaction.is_grouped_child() {
            return Err(StateError::Invalid(format!(
                "Transaction {id} is part of a transaction group and cannot be split"
            )));
        }
        if transaction.is_split_part() || self.is_split(id) {
            return Err(StateError::Invalid(format!(
                "Transaction {id} is already split"
            )));
        }
        if transaction.recurring_expense_id.is_some() {
            return Err(StateError::Invalid(format!(
                "Transaction {id} is a recurring transaction and cannot be split"
            )));
        }
        if parts.len() < MIN_SPLIT_PARTS {
            return Err(StateError::Invalid(format!(
                "A split needs at least {MIN_SPLIT_PARTS} parts"
            )));
        }

        let parts: Vec<TransactionSplit> = parts
            .iter()
            .cloned()
            .map(|mut part| {
                part.amount *= sign;
                part
            })
            .collect();
        let total: Decimal = parts.iter().map(|p| p.amount).sum();
        if total != amount {
            return Err(StateError::Invalid(format!(
                "Split amounts add up to {total}, expected {amount}"
            )));
        }
        Ok(parts)
    }

    /// Delete a transaction that is neither grouped nor split.
    pub fn delete_transaction(&mut self, id: u64) -> Result<(), StateError> {
        let transaction = self
            .transactions
            .get(&id)
            .ok_or_else(|| StateError::NotFound(format!("Transaction {id} not found")))?;

        if transaction.is_group() || transaction.is_grouped_child() {
            return Err(StateError::Invalid(format!(
                "Transaction {id} is part of a transaction group; ungroup it first"
            )));
        }
        if transaction.is_split_part() || self.is_split(id) {
            return Err(StateError::Invalid(format!(
                "Transaction {id} is part of a split transaction"
            )));
        }

        self.transactions.remove(&id);
        Ok(())
    }

    /// Fold existing transactions into a new group transaction.
    ///
    /// The group's amount is the sum of the children's amounts. When the
    /// children mix currencies, their `to_base` amounts (or raw amounts when
    /// absent) are summed in the primary currency.
    pub fn group_transactions(
        &mut self,
        request: GroupTransactionsRequest,
    ) -> Result<Transaction, StateError> {
        if request.ids.len() < MIN_GROUP_SIZE {
            return Err(StateError::Invalid(format!(
                "At least {MIN_GROUP_SIZE} transactions are required to create a group"
            )));
        }

        let mut children = Vec::with_capacity(request.ids.len());
        for id in &request.ids {
            let child = self.transactions.get(id).ok_or_else(|| {
                StateError::Invalid(format!("Transaction {id} does not exist"))
            })?;
            if child.is_grouped_child() {
                return Err(StateError::Invalid(format!(
                    "Transaction {id} is already in a transaction group"
                )));
            }
            if child.is_group() {
                return Err(StateError::Invalid(format!(
                    "Transaction {id} is a transaction group and cannot be grouped"
                )));
            }
            if self.is_split(*id) {
                return Err(StateError::Invalid(format!(
                    "Transaction {id} has been split; group its parts instead"
                )));
            }
            children.push(child);
        }

        let currencies: BTreeSet<String> =
            children.iter().map(|c| c.currency.to_lowercase()).collect();
        let (amount, currency) = match currencies.into_iter().collect::<Vec<_>>().as_slice() {
            [single] => (
                children.iter().map(|c| c.amount).sum::<Decimal>(),
                single.clone(),
            ),
            _ => (
                children
                    .iter()
                    .map(|c| c.base_amount.unwrap_or(c.amount))
                    .sum::<Decimal>(),
                self.primary_currency.clone(),
            ),
        };

        let date = request
            .date
            .or_else(|| children.iter().map(|c| c.date).min())
            .unwrap_or_else(|| Utc::now().date_naive());
        let payee = request
            .payee
            .or_else(|| children.iter().find_map(|c| c.payee.clone()));
        let tags = self.resolve_tags(&request.tag_ids)?;

        let id = self.allocate_id();
        let mut group = Transaction::new(id, date, amount, currency);
        group.payee = payee;
        group.category_id = request.category_id;
        group.notes = request.notes;
        group.tags = tags;
        group.grouped = Some(true);
        group.created_at = Some(Utc::now());

        for child_id in &request.ids {
            if let Some(child) = self.transactions.get_mut(child_id) {
                child.group_id = Some(id);
            }
        }
        self.transactions.insert(id, group);

        self.get_transaction(id)
            .ok_or_else(|| StateError::NotFound(format!("Transaction group {id} not found")))
    }

    /// Delete a group and detach its children.
    pub fn ungroup_transactions(&mut self, group_id: u64) -> Result<(), StateError> {
        let is_group = self
            .transactions
            .get(&group_id)
            .is_some_and(Transaction::is_group);
        if !is_group {
            return Err(StateError::NotFound(format!(
                "Transaction group {group_id} not found"
            )));
        }

        self.transactions.remove(&group_id);
        for transaction in self.transactions.values_mut() {
            if transaction.group_id == Some(group_id) {
                transaction.group_id = None;
            }
        }
        Ok(())
    }

    /// Create a manually managed account.
    pub fn create_asset(&mut self, new: NewAsset) -> Asset {
        let id = self.allocate_id();
        let asset = Asset {
            id,
            kind: new.kind,
            subtype_name: new.subtype_name,
            name: new.name,
            display_name: new.display_name,
            balance: new.balance,
            balance_as_of: new.balance_as_of.or_else(|| Some(Utc::now())),
            currency: new
                .currency
                .unwrap_or_else(|| self.primary_currency.clone()),
            institution_name: new.institution_name,
            closed_on: new.closed_on,
            exclude_transactions: new.exclude_transactions,
            created_at: Some(Utc::now()),
        };
        self.assets.insert(id, asset.clone());
        asset
    }

    /// Apply an update to a manually managed account.
    pub fn update_asset(&mut self, id: u64, update: AssetUpdate) -> Option<Asset> {
        let asset = self.assets.get_mut(&id)?;

        if let Some(kind) = update.kind {
            asset.kind = kind;
        }
        if let Some(subtype) = update.subtype_name {
            asset.subtype_name = Some(subtype);
        }
        if let Some(name) = update.name {
            asset.name = name;
        }
        if let Some(display_name) = update.display_name {
            asset.display_name = Some(display_name);
        }
        if let Some(balance) = update.balance {
            asset.balance = balance;
            asset.balance_as_of = update.balance_as_of.or_else(|| Some(Utc::now()));
        }
        if let Some(currency) = update.currency {
            asset.currency = currency;
        }
        if let Some(institution) = update.institution_name {
            asset.institution_name = Some(institution);
        }
        if let Some(closed_on) = update.closed_on {
            asset.closed_on = Some(closed_on);
        }
        if let Some(exclude) = update.exclude_transactions {
            asset.exclude_transactions = Some(exclude);
        }

        Some(asset.clone())
    }

    /// Apply an update to a manual crypto holding.
    ///
    /// Synced holdings cannot be updated and are reported as missing.
    pub fn update_crypto(&mut self, id: u64, update: CryptoUpdate) -> Option<CryptoHolding> {
        let holding = self
            .crypto
            .iter_mut()
            .find(|h| h.is_manual() && h.id == Some(id))?;

        if let Some(name) = update.name {
            holding.name = name;
        }
        if let Some(display_name) = update.display_name {
            holding.display_name = Some(display_name);
        }
        if let Some(institution) = update.institution_name {
            holding.institution_name = Some(institution);
        }
        if let Some(balance) = update.balance {
            holding.balance = balance;
            holding.balance_as_of = Some(Utc::now());
        }
        if let Some(currency) = update.currency {
            holding.currency = currency;
        }

        Some(holding.clone())
    }

    /// Budget summaries with months outside the range dropped.
    pub fn budgets_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<Budget> {
        self.budgets
            .iter()
            .cloned()
            .map(|mut b| {
                b.data.retain(|month, _| *month >= start && *month <= end);
                b
            })
            .collect()
    }

    /// Set the budget amount for a category and month.
    pub fn upsert_budget(
        &mut self,
        start_date: NaiveDate,
        category_id: u64,
        amount: Decimal,
        currency: Option<String>,
    ) -> Result<(), StateError> {
        let budget = self
            .budgets
            .iter_mut()
            .find(|b| b.category_id == Some(category_id))
            .ok_or_else(|| StateError::NotFound(format!("Category {category_id} not found")))?;

        let month = budget.data.entry(start_date).or_default();
        month.budget_amount = Some(amount);
        month.budget_currency = Some(currency.unwrap_or_else(|| self.primary_currency.clone()));
        Ok(())
    }

    /// Clear the budget amount for a category and month.
    pub fn remove_budget(&mut self, start_date: NaiveDate, category_id: u64) -> Result<(), StateError> {
        let month = self
            .budgets
            .iter_mut()
            .find(|b| b.category_id == Some(category_id))
            .and_then(|b| b.data.get_mut(&start_date))
            .ok_or_else(|| {
                StateError::NotFound(format!(
                    "No budget for category {category_id} starting {start_date}"
                ))
            })?;

        month.budget_amount = None;
        month.budget_currency = None;
        month.budget_in_base = None;
        Ok(())
    }
}
