//! Core data models for the wallet
//!
//! This module contains the ledger and the entries it records, the money type
//! used for every amount, and the search predicates the ledger applies.

pub mod entry;
pub mod filters;
pub mod ledger;
pub mod money;

pub use entry::{parse_iso_date, Entry, EntryCategory};
pub use filters::{EntryFilter, SearchField, SearchValue};
pub use ledger::Ledger;
pub use money::Money;
