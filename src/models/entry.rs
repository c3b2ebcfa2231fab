//! Wallet entry model
//!
//! An entry is one recorded income or spending item. Entries are immutable:
//! editing an entry means building a replacement and swapping it into the
//! ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::money::Money;
use crate::error::{WalletError, WalletResult};

/// Parse a calendar date written exactly as `YYYY-MM-DD`
///
/// Unpadded or otherwise reshaped dates such as `2024-1-3` are rejected.
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    let shaped = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
}

/// Classification of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryCategory {
    Income = 1,
    Spend = 2,
}

impl EntryCategory {
    /// All categories in code order
    pub const ALL: [EntryCategory; 2] = [EntryCategory::Income, EntryCategory::Spend];

    /// Integer code used in wallet files
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    /// Slot of this category in per-category arrays
    pub(crate) const fn index(&self) -> usize {
        match self {
            Self::Income => 0,
            Self::Spend => 1,
        }
    }

    /// Human-readable label
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Spend => "Spending",
        }
    }
}

impl fmt::Display for EntryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<i64> for EntryCategory {
    type Error = WalletError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Income),
            2 => Ok(Self::Spend),
            other => Err(WalletError::InvalidEntry(format!(
                "unknown category code {}",
                other
            ))),
        }
    }
}

impl FromStr for EntryCategory {
    type Err = WalletError;

    /// Accepts the integer code or the category name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(code) = s.parse::<i64>() {
            return Self::try_from(code);
        }
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "spend" | "spending" => Ok(Self::Spend),
            _ => Err(WalletError::InvalidEntry(format!("unknown category '{}'", s))),
        }
    }
}

/// One recorded income or spending item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "EntryRecord", try_from = "EntryRecord")]
pub struct Entry {
    date: NaiveDate,
    category: EntryCategory,
    amount: Money,
    description: String,
}

impl Entry {
    /// Create a new entry, rounding the amount to two fractional digits
    ///
    /// # Errors
    ///
    /// Returns `InvalidEntry` if the amount is negative or not a finite number.
    pub fn new(
        date: NaiveDate,
        category: EntryCategory,
        amount: f64,
        description: impl Into<String>,
    ) -> WalletResult<Self> {
        let amount = Money::from_decimal(amount)
            .map_err(|e| WalletError::InvalidEntry(e.to_string()))?;
        Self::from_money(date, category, amount, description)
    }

    /// Create a new entry from an already rounded amount
    pub fn from_money(
        date: NaiveDate,
        category: EntryCategory,
        amount: Money,
        description: impl Into<String>,
    ) -> WalletResult<Self> {
        if amount.is_negative() {
            return Err(WalletError::InvalidEntry(format!(
                "amount must not be negative, got {}",
                amount
            )));
        }

        Ok(Self {
            date,
            category,
            amount,
            description: description.into(),
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn category(&self) -> EntryCategory {
        self.category
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Serialize into the wallet file representation
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "date": self.date.format("%Y-%m-%d").to_string(),
            "category": self.category.code(),
            "amount": self.amount.to_decimal(),
            "description": self.description,
        })
    }

    /// Parse an entry from the wallet file representation
    pub fn from_json(value: &Value) -> WalletResult<Self> {
        let record = EntryRecord::deserialize(value)
            .map_err(|e| WalletError::InvalidEntry(e.to_string()))?;
        Self::try_from(record)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Date: {}\nCategory: {}\nAmount: {}\nDescription: {}",
            self.date.format("%Y-%m-%d"),
            self.category,
            self.amount,
            self.description
        )
    }
}

/// Serialized form of an entry as it appears in wallet files
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EntryRecord {
    date: String,
    category: i64,
    amount: Money,
    description: String,
}

impl From<Entry> for EntryRecord {
    fn from(entry: Entry) -> Self {
        Self {
            date: entry.date.format("%Y-%m-%d").to_string(),
            category: i64::from(entry.category.code()),
            amount: entry.amount,
            description: entry.description,
        }
    }
}

impl TryFrom<EntryRecord> for Entry {
    type Error = WalletError;

    fn try_from(record: EntryRecord) -> Result<Self, Self::Error> {
        let date = parse_iso_date(&record.date).ok_or_else(|| {
            WalletError::InvalidEntry(format!("'{}' is not a YYYY-MM-DD date", record.date))
        })?;
        let category = EntryCategory::try_from(record.category)?;
        Entry::from_money(date, category, record.amount, record.description)
    }
}
