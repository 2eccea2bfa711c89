//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use crate::{Asset, Page, PlaidAccount, RecurringExpense, Transaction};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

impl PrettyPrint for Transaction {
    fn pretty_print(&self) -> String {
        let header = if self.is_group() {
            format!("Transaction group #{}", self.id)
        } else {
            format!("Transaction #{}", self.id)
        };
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Date:           {}", self.date),
            format!("Amount:         {} {}", self.amount, self.currency.to_uppercase()),
            format!("Status:         {}", self.status),
        ];

        if let Some(ref payee) = self.payee {
            lines.push(format!("Payee:          {}", payee));
        }

        if let Some(group_id) = self.group_id {
            lines.push(format!("Grouped into:   #{}", group_id));
        }

        if let Some(parent_id) = self.parent_id {
            lines.push(format!("Split from:     #{}", parent_id));
        }

        if let Some(ref notes) = self.notes {
            lines.push(format!("Notes:          {}", notes));
        }

        if !self.tags.is_empty() {
            let tags: Vec<&str> = self.tags.iter().map(|t| t.name.as_str()).collect();
            lines.push(format!("Tags:           {}", tags.join(", ")));
        }

        if !self.children.is_empty() {
            lines.push(format!("Children:       {}", self.children.len()));
            for child in &self.children {
                lines.push(format!(
                    "  #{:<10} {}  {:>12} {}  {}",
                    child.id,
                    child.date,
                    child.amount,
                    child.currency.to_uppercase(),
                    child.payee.as_deref().unwrap_or("")
                ));
            }
        }

        lines.join("\n")
    }
}

impl PrettyPrint for Asset {
    fn pretty_print(&self) -> String {
        let header = format!("Asset: {}", self.label());
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("ID:             {}", self.id),
            format!("Type:           {}", self.kind),
            format!("Balance:        {} {}", self.balance, self.currency.to_uppercase()),
        ];

        if let Some(ref institution) = self.institution_name {
            lines.push(format!("Institution:    {}", institution));
        }

        if let Some(ref as_of) = self.balance_as_of {
            lines.push(format!("As of:          {}", as_of.format("%Y-%m-%d %H:%M:%S UTC")));
        }

        if let Some(closed) = self.closed_on {
            lines.push(format!("Closed:         {}", closed));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for PlaidAccount {
    fn pretty_print(&self) -> String {
        let header = format!("Plaid account: {}", self.label());
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("ID:             {}", self.id),
            format!("Status:         {}", self.status),
            format!("Balance:        {} {}", self.balance, self.currency.to_uppercase()),
        ];

        if let Some(ref institution) = self.institution_name {
            let mask = self.mask.as_deref().map(|m| format!(" (...{m})")).unwrap_or_default();
            lines.push(format!("Institution:    {}{}", institution, mask));
        }

        if let Some(limit) = self.limit {
            lines.push(format!("Limit:          {} {}", limit, self.currency.to_uppercase()));
        }

        lines.join("\n")
    }
}

impl PrettyPrint for RecurringExpense {
    fn pretty_print(&self) -> String {
        let header = format!("Recurring: {}", self.payee);
        let divider = "─".repeat(header.len().max(30));

        let mut lines = vec![
            header,
            divider,
            format!("Amount:         {} {}", self.amount, self.currency.to_uppercase()),
            format!("Cadence:        {}", self.cadence),
            format!("Next billing:   {}", self.billing_date),
        ];

        if let Some(ref description) = self.description {
            lines.push(format!("Description:    {}", description));
        }

        lines.join("\n")
    }
}

/// Footer shown under a paginated table.
///
/// The range is the window of the listing the page covers, which can be
/// wider than the rows shown when the page was filtered.
pub fn page_footer<T>(page: &Page<T>) -> String {
    let first = page.offset.saturating_add(1);
    let last = page.next_offset();
    let range = if last == page.offset {
        format!("No items from {first}")
    } else if page.is_empty() {
        format!("No matching items in {first}-{last}")
    } else {
        format!("Items {first}-{last}")
    };
    if page.has_more {
        format!("{range} (more available, use --offset {last})")
    } else {
        format!("{range} (end)")
    }
}
