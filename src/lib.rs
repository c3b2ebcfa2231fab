//! wallet-cli - Terminal personal finance ledger
//!
//! This library provides the core functionality of the wallet: dated income
//! and spending entries held in a ledger with running totals per category,
//! filtered search, and persistence as a single JSON document.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Entries, amounts, search filters and the ledger itself
//! - `storage`: JSON file storage layer
//! - `config`: Configuration and path management
//! - `display`: Terminal formatting
//! - `cli`: One-shot commands and the interactive menu session
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use wallet::models::{Entry, EntryCategory, Ledger};
//!
//! let mut ledger = Ledger::new();
//! ledger.add(Entry::new(date, EntryCategory::Income, 1500.0, "Salary")?)?;
//! println!("{}", ledger.balance());
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod storage;

pub use error::{WalletError, WalletResult};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber
///
/// Reads `RUST_LOG`, defaulting to warnings from this crate, and writes to
/// stderr so logs never mix with prompts.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wallet=warn"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
