//! One-shot CLI commands
//!
//! Each command loads the wallet file, acts on it and, for `add`, saves it
//! back. The interactive shell is launched from `main`.

use std::path::Path;

use clap::Subcommand;

use crate::config::{Settings, WalletPaths};
use crate::display::{format_balance_summary, format_entry_register};
use crate::error::{WalletError, WalletResult};
use crate::models::{parse_iso_date, Entry, EntryCategory, Ledger, Money, SearchField};
use crate::storage::{read_json, write_json_atomic, JsonStore};

/// Wallet subcommands
#[derive(Subcommand)]
pub enum WalletCommands {
    /// Start the interactive menu (default)
    Shell,

    /// Show total income, total spending and balance
    Balance,

    /// List entries
    List {
        /// Show at most this many entries
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Find entries by category, date or amount
    Find {
        /// Field to search (category, date, amount)
        field: SearchField,
        /// Value to look for
        value: String,
    },

    /// Add an entry and save the wallet
    Add {
        /// Entry date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Category (income, spend, 1 or 2)
        #[arg(short, long)]
        category: EntryCategory,
        /// Amount (e.g., "12.50")
        #[arg(short, long)]
        amount: String,
        /// Description
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Show current configuration and paths
    Config,
}

/// Load the ledger stored at `path`
///
/// A missing file is an error unless `allow_missing` is set, in which case an
/// empty ledger is returned.
pub fn load_ledger(path: &Path, allow_missing: bool) -> WalletResult<Ledger> {
    if allow_missing && !path.exists() {
        return Ok(Ledger::new());
    }
    let doc = read_json::<serde_json::Value, _>(path)?;
    Ledger::from_json(&doc)
}

/// Handle a one-shot command against the store's default wallet file
pub fn handle_command(
    store: &JsonStore,
    paths: &WalletPaths,
    settings: &Settings,
    cmd: WalletCommands,
) -> WalletResult<()> {
    let path = store.default_path();

    match cmd {
        WalletCommands::Shell => {}

        WalletCommands::Balance => {
            let ledger = load_ledger(path, false)?;
            println!("{}", format_balance_summary(&ledger, settings));
        }

        WalletCommands::List { limit } => {
            let ledger = load_ledger(path, false)?;
            let stop = limit.unwrap_or(ledger.len());
            let entries = ledger.get_range(0, stop, 1)?;
            print!("{}", format_entry_register(&entries, settings));

            if entries.len() < ledger.len() {
                println!();
                println!("Showing {} of {} entries", entries.len(), ledger.len());
            }
        }

        WalletCommands::Find { field, value } => {
            let ledger = load_ledger(path, false)?;
            let found = ledger.find(field, value.as_str());
            if found.is_empty() {
                println!("No matching entries found.");
            } else {
                print!("{}", format_entry_register(&found, settings));
            }
        }

        WalletCommands::Add {
            date,
            category,
            amount,
            description,
        } => {
            let mut ledger = load_ledger(path, true)?;

            let amount = Money::parse(&amount).map_err(|e| {
                WalletError::Validation(format!(
                    "Invalid amount format: '{}'. Use format like '12.50'. Error: {}",
                    amount, e
                ))
            })?;

            // Parse date (default to today)
            let date = if let Some(date_str) = date {
                parse_iso_date(date_str.trim()).ok_or_else(|| {
                    WalletError::Validation(format!(
                        "Invalid date format: '{}'. Use YYYY-MM-DD",
                        date_str
                    ))
                })?
            } else {
                chrono::Local::now().date_naive()
            };

            let entry = Entry::from_money(date, category, amount, description)?;
            let key = ledger.add(entry.clone())?;
            write_json_atomic(path, &ledger.to_json())?;

            println!("Added entry {}:", key + 1);
            println!("{}", entry);
            println!();
            println!("Saved to {}", path.display());
        }

        WalletCommands::Config => {
            // Write the defaults out so there is a file to edit
            if !paths.settings_file().exists() {
                settings.save(paths)?;
                println!("Created settings file with defaults.");
                println!();
            }

            println!("Wallet Configuration");
            println!("====================");
            println!("Config directory: {}", paths.config_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Wallet file:      {}", path.display());
            println!();
            println!("Settings:");
            println!("  Page size:       {}", settings.effective_page_size());
            println!("  Currency symbol: {:?}", settings.currency_symbol);
            println!("  Date format:     {}", settings.date_format);
        }
    }

    Ok(())
}
