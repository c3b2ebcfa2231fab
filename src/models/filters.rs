//! Entry search predicates
//!
//! Each search field has a pure constructor turning a search value into an
//! [`EntryFilter`]. A value that cannot be interpreted for the field yields a
//! filter that matches nothing rather than an error.

use chrono::NaiveDate;
use std::fmt;

use super::entry::{parse_iso_date, Entry, EntryCategory};
use super::money::Money;
use crate::error::WalletError;

/// Maximum distance between two rounded amounts that still counts as equal
pub const AMOUNT_TOLERANCE: f64 = 0.001;

/// Entry field a search runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Category = 1,
    Date = 2,
    Amount = 3,
}

impl SearchField {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Date => "date",
            Self::Amount => "amount",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for SearchField {
    type Error = WalletError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Category),
            2 => Ok(Self::Date),
            3 => Ok(Self::Amount),
            other => Err(WalletError::Validation(format!(
                "unknown search field {}",
                other
            ))),
        }
    }
}

impl std::str::FromStr for SearchField {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "category" => Ok(Self::Category),
            "2" | "date" => Ok(Self::Date),
            "3" | "amount" => Ok(Self::Amount),
            other => Err(WalletError::Validation(format!(
                "unknown search field '{}'",
                other
            ))),
        }
    }
}

/// A value to search for, either already typed or raw user text
#[derive(Debug, Clone, PartialEq)]
pub enum SearchValue {
    Category(EntryCategory),
    Date(NaiveDate),
    Amount(f64),
    Text(String),
}

impl From<EntryCategory> for SearchValue {
    fn from(category: EntryCategory) -> Self {
        Self::Category(category)
    }
}

impl From<NaiveDate> for SearchValue {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<f64> for SearchValue {
    fn from(amount: f64) -> Self {
        Self::Amount(amount)
    }
}

impl From<Money> for SearchValue {
    fn from(amount: Money) -> Self {
        Self::Amount(amount.to_decimal())
    }
}

impl From<&str> for SearchValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for SearchValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Predicate over entries; a `None` target never matches
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryFilter {
    Category(Option<EntryCategory>),
    Date(Option<NaiveDate>),
    Amount(Option<f64>),
}

impl EntryFilter {
    /// Build the predicate for `field` from `value`
    pub fn build(field: SearchField, value: &SearchValue) -> Self {
        match field {
            SearchField::Category => category_filter(value),
            SearchField::Date => date_filter(value),
            SearchField::Amount => amount_filter(value),
        }
    }

    /// Check whether an entry satisfies the predicate
    pub fn matches(&self, entry: &Entry) -> bool {
        match *self {
            Self::Category(Some(category)) => entry.category() == category,
            Self::Date(Some(date)) => entry.date() == date,
            Self::Amount(Some(target)) => {
                (entry.amount().to_decimal() - target).abs() <= AMOUNT_TOLERANCE
            }
            Self::Category(None) | Self::Date(None) | Self::Amount(None) => false,
        }
    }
}

/// Match entries of one category
///
/// Text must be an integer category code; names match nothing.
pub fn category_filter(value: &SearchValue) -> EntryFilter {
    let category = match value {
        SearchValue::Category(category) => Some(*category),
        SearchValue::Text(text) => text
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|code| EntryCategory::try_from(code).ok()),
        _ => None,
    };
    EntryFilter::Category(category)
}

/// Match entries recorded on one date
pub fn date_filter(value: &SearchValue) -> EntryFilter {
    let date = match value {
        SearchValue::Date(date) => Some(*date),
        SearchValue::Text(text) => parse_iso_date(text.trim()),
        _ => None,
    };
    EntryFilter::Date(date)
}

/// Match entries whose amount equals the value after rounding both to cents
pub fn amount_filter(value: &SearchValue) -> EntryFilter {
    let amount = match value {
        SearchValue::Amount(amount) => Some(*amount),
        SearchValue::Text(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    EntryFilter::Amount(amount.and_then(round2))
}

/// Round to cents the same way stored amounts are rounded
fn round2(value: f64) -> Option<f64> {
    Money::from_decimal(value).ok().map(|m| m.to_decimal())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(category: EntryCategory, amount: f64, day: u32) -> Entry {
        let date = NaiveDate::from_ymd_opt(2024, 5, day).unwrap();
        Entry::new(date, category, amount, "").unwrap()
    }

    #[test]
    fn test_category_filter_accepts_enum_and_code() {
        let income = entry(EntryCategory::Income, 10.0, 1);
        let spend = entry(EntryCategory::Spend, 10.0, 1);

        let by_enum = category_filter(&EntryCategory::Income.into());
        assert!(by_enum.matches(&income));
        assert!(!by_enum.matches(&spend));

        let by_code = category_filter(&"2".into());
        assert!(by_code.matches(&spend));
        assert!(!by_code.matches(&income));
    }

    #[test]
    fn test_category_names_match_nothing() {
        let income = entry(EntryCategory::Income, 10.0, 1);
        assert_eq!(category_filter(&"income".into()), EntryFilter::Category(None));
        assert!(!category_filter(&"Income".into()).matches(&income));
    }

    #[test]
    fn test_invalid_values_match_nothing() {
        let income = entry(EntryCategory::Income, 10.0, 1);

        assert_eq!(category_filter(&"9".into()), EntryFilter::Category(None));
        assert!(!category_filter(&"abc".into()).matches(&income));
        assert!(!date_filter(&"2024-13-01".into()).matches(&income));
        assert!(!amount_filter(&"ten".into()).matches(&income));
        assert!(!amount_filter(&SearchValue::Amount(f64::NAN)).matches(&income));
        assert!(!category_filter(&SearchValue::Amount(1.0)).matches(&income));
    }

    #[test]
    fn test_date_filter() {
        let first = entry(EntryCategory::Spend, 1.0, 1);
        let second = entry(EntryCategory::Spend, 1.0, 2);

        let filter = date_filter(&"2024-05-02".into());
        assert!(filter.matches(&second));
        assert!(!filter.matches(&first));

        let typed = date_filter(&NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().into());
        assert!(typed.matches(&first));

        assert_eq!(date_filter(&"2024-5-2".into()), EntryFilter::Date(None));
        assert!(!date_filter(&"2024-05-2".into()).matches(&second));
    }

    #[test]
    fn test_amount_filter_tolerance() {
        let e = entry(EntryCategory::Spend, 123.45, 1);

        assert!(amount_filter(&SearchValue::Amount(123.45)).matches(&e));
        assert!(amount_filter(&"123.45".into()).matches(&e));
        assert!(amount_filter(&SearchValue::Amount(123.4501)).matches(&e));
        assert!(!amount_filter(&SearchValue::Amount(123.46)).matches(&e));
        assert!(!amount_filter(&SearchValue::Amount(123.44)).matches(&e));
    }

    #[test]
    fn test_amount_filter_rounds_like_stored_amounts() {
        let e = entry(EntryCategory::Spend, 1.115, 1);
        assert!(amount_filter(&"1.11".into()).matches(&e));
        assert!(amount_filter(&SearchValue::Amount(1.115)).matches(&e));
        assert!(!amount_filter(&"1.12".into()).matches(&e));

        let e = entry(EntryCategory::Spend, 0.285, 1);
        assert!(amount_filter(&"0.28".into()).matches(&e));
    }

    #[test]
    fn test_zero_amount_is_searchable() {
        let e = entry(EntryCategory::Income, 0.0, 1);
        assert!(amount_filter(&"0".into()).matches(&e));
    }

    #[test]
    fn test_build_dispatches_on_field() {
        let value = SearchValue::from("1");
        assert_eq!(
            EntryFilter::build(SearchField::Category, &value),
            EntryFilter::Category(Some(EntryCategory::Income))
        );
        assert_eq!(
            EntryFilter::build(SearchField::Amount, &value),
            EntryFilter::Amount(Some(1.0))
        );
        assert_eq!(EntryFilter::build(SearchField::Date, &value), EntryFilter::Date(None));
    }

    #[test]
    fn test_search_field_parsing() {
        assert_eq!(SearchField::try_from(3).unwrap(), SearchField::Amount);
        assert!(SearchField::try_from(4).is_err());
        assert_eq!("date".parse::<SearchField>().unwrap(), SearchField::Date);
        assert_eq!("1".parse::<SearchField>().unwrap(), SearchField::Category);
        assert!("payee".parse::<SearchField>().is_err());
    }
}
