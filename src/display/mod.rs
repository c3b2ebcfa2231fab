//! Display formatting for terminal output
//!
//! Provides utilities for formatting entries and ledger totals for display.

pub mod entry;

pub use entry::{
    format_balance_summary, format_entry_details, format_entry_page, format_entry_register,
};
