//! Ledger model
//!
//! The ledger keeps entries under dense integer keys assigned in insertion
//! order and maintains a running total per category. Totals are updated
//! alongside every mutation and only rebuilt when a ledger is constructed.

use serde_json::{json, Value};
use tracing::debug;

use super::entry::{Entry, EntryCategory};
use super::filters::{EntryFilter, SearchField, SearchValue};
use super::money::Money;
use crate::error::{WalletError, WalletResult};

/// Ordered collection of entries with per-category running totals
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    /// Entry stored under key `i` lives at index `i`
    entries: Vec<Entry>,
    /// Running totals indexed by `EntryCategory::index`
    totals: [Money; 2],
}

impl Ledger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger by adding each entry in order
    ///
    /// # Errors
    ///
    /// Returns `InvalidEntry` if a running total would overflow.
    pub fn from_entries<I>(entries: I) -> WalletResult<Self>
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut ledger = Self::new();
        for entry in entries {
            ledger.add(entry)?;
        }
        Ok(ledger)
    }

    /// Append an entry under the next key and return that key
    ///
    /// # Errors
    ///
    /// Returns `InvalidEntry` without touching the ledger if the entry's
    /// category total would overflow.
    pub fn add(&mut self, entry: Entry) -> WalletResult<usize> {
        let key = self.entries.len();
        let slot = entry.category().index();
        self.totals[slot] = self.totals[slot]
            .checked_add(entry.amount())
            .ok_or_else(|| total_overflow(entry.category()))?;

        debug!(key, category = %entry.category(), amount = %entry.amount(), "Added entry");
        self.entries.push(entry);
        Ok(key)
    }

    /// Swap the entry stored under `key`, returning the previous entry
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `key` is not present and `InvalidEntry` if a
    /// category total would overflow. The ledger is untouched in both cases.
    pub fn replace(&mut self, key: usize, entry: Entry) -> WalletResult<Entry> {
        let old = self
            .entries
            .get(key)
            .ok_or_else(|| WalletError::entry_not_found(key))?;

        let mut totals = self.totals;
        let old_slot = old.category().index();
        let new_slot = entry.category().index();
        totals[old_slot] = totals[old_slot]
            .checked_sub(old.amount())
            .ok_or_else(|| total_overflow(old.category()))?;
        totals[new_slot] = totals[new_slot]
            .checked_add(entry.amount())
            .ok_or_else(|| total_overflow(entry.category()))?;

        debug!(
            key,
            old_amount = %old.amount(),
            new_amount = %entry.amount(),
            "Replaced entry"
        );
        self.totals = totals;
        Ok(std::mem::replace(&mut self.entries[key], entry))
    }

    /// Get the entry under `key`, if any
    pub fn get(&self, key: usize) -> Option<&Entry> {
        self.entries.get(key)
    }

    /// Get the entry under `key`, reporting a missing key as an error
    pub fn entry(&self, key: usize) -> WalletResult<&Entry> {
        self.get(key).ok_or_else(|| WalletError::entry_not_found(key))
    }

    /// Entries with keys in `[start, stop)` taking every `step`-th key
    ///
    /// Bounds past the end are clamped, so a range outside the ledger is empty.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `step` is zero.
    pub fn get_range(
        &self,
        start: usize,
        stop: usize,
        step: usize,
    ) -> WalletResult<Vec<(usize, &Entry)>> {
        if step == 0 {
            return Err(WalletError::Validation("range step must not be zero".into()));
        }

        let stop = stop.min(self.entries.len());
        let start = start.min(stop);

        Ok(self.entries[start..stop]
            .iter()
            .enumerate()
            .step_by(step)
            .map(|(offset, entry)| (start + offset, entry))
            .collect())
    }

    /// All entries with their keys, in key order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Entry)> {
        self.entries.iter().enumerate()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Running total for one category
    pub fn total(&self, category: EntryCategory) -> Money {
        self.totals[category.index()]
    }

    /// Total income minus total spending
    pub fn balance(&self) -> Money {
        self.total(EntryCategory::Income) - self.total(EntryCategory::Spend)
    }

    pub fn total_income(&self) -> Money {
        self.total(EntryCategory::Income)
    }

    pub fn total_spending(&self) -> Money {
        self.total(EntryCategory::Spend)
    }

    /// Entries whose `field` matches `value`, in key order
    ///
    /// A value that cannot be read for the field finds nothing.
    pub fn find(&self, field: SearchField, value: impl Into<SearchValue>) -> Vec<(usize, &Entry)> {
        let filter = EntryFilter::build(field, &value.into());
        self.iter().filter(|(_, entry)| filter.matches(entry)).collect()
    }

    /// Serialize into the wallet file document
    pub fn to_json(&self) -> Value {
        let entries: Vec<Value> = self.entries.iter().map(Entry::to_json).collect();
        json!({ "entries": entries })
    }

    /// Build a ledger from a wallet file document
    ///
    /// A missing, null or empty `entries` list gives an empty ledger. Totals
    /// are recomputed from the entries.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLedger` if the document is not an object, `entries` is
    /// not a list, or any entry fails to parse. No ledger is produced then.
    pub fn from_json(doc: &Value) -> WalletResult<Self> {
        let object = doc
            .as_object()
            .ok_or_else(|| WalletError::InvalidLedger("document is not a JSON object".into()))?;

        let raw_entries = match object.get("entries") {
            None | Some(Value::Null) => return Ok(Self::new()),
            Some(Value::Array(items)) => items,
            Some(_) => {
                return Err(WalletError::InvalidLedger("'entries' is not a list".into()));
            }
        };

        let entries = raw_entries
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                Entry::from_json(raw).map_err(|e| {
                    WalletError::InvalidLedger(format!("entry {}: {}", index + 1, e))
                })
            })
            .collect::<WalletResult<Vec<_>>>()?;

        Self::from_entries(entries).map_err(|e| WalletError::InvalidLedger(e.to_string()))
    }
}

fn total_overflow(category: EntryCategory) -> WalletError {
    WalletError::InvalidEntry(format!("{} total is out of range", category))
}
