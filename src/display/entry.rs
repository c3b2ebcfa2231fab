//! Entry display formatting
//!
//! Formats entries and ledger totals for terminal output. Entries are
//! numbered from one (key + 1), matching the numbers users type when editing.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::config::Settings;
use crate::models::{Entry, Ledger, Money};

/// Format a date with the configured format, falling back to ISO-8601
pub fn format_date(date: NaiveDate, settings: &Settings) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(&settings.date_format)).is_err() {
        return date.format("%Y-%m-%d").to_string();
    }
    out
}

/// Format an amount with the configured currency symbol
pub fn format_amount(amount: Money, settings: &Settings) -> String {
    amount.format_with_symbol(&settings.currency_symbol)
}

/// Format one entry as a numbered detail block
pub fn format_entry_details(key: usize, entry: &Entry, settings: &Settings) -> String {
    format!(
        "{}) Date: {}\nCategory: {}\nAmount: {}\nDescription: {}",
        key + 1,
        format_date(entry.date(), settings),
        entry.category(),
        format_amount(entry.amount(), settings),
        entry.description()
    )
}

/// Format a page of entries as detail blocks separated by blank lines
pub fn format_entry_page(entries: &[(usize, &Entry)], settings: &Settings) -> String {
    let mut output = String::new();
    for (key, entry) in entries {
        output.push_str(&format_entry_details(*key, entry, settings));
        output.push_str("\n\n");
    }
    output
}

/// Format entries as a one-line-per-entry table
pub fn format_entry_register(entries: &[(usize, &Entry)], settings: &Settings) -> String {
    if entries.is_empty() {
        return "No entries found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:>4}  {:10}  {:8}  {:>12}  {}\n",
        "#", "Date", "Category", "Amount", "Description"
    ));
    output.push_str(&"-".repeat(60));
    output.push('\n');

    for (key, entry) in entries {
        output.push_str(&format!(
            "{:>4}  {:10}  {:8}  {:>12}  {}\n",
            key + 1,
            format_date(entry.date(), settings),
            entry.category().label(),
            format_amount(entry.amount(), settings),
            entry.description()
        ));
    }

    output
}

/// Format the income, spending and balance of a ledger
pub fn format_balance_summary(ledger: &Ledger, settings: &Settings) -> String {
    format!(
        "Total income: {}\nTotal spending: {}\nBalance: {}",
        format_amount(ledger.total_income(), settings),
        format_amount(ledger.total_spending(), settings),
        format_amount(ledger.balance(), settings)
    )
}
