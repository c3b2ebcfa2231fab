//! Money type for representing currency amounts
//!
//! Internally stores amounts in hundredths (i64) so that running totals never
//! drift. Converts to and from the two-decimal numbers used in wallet files.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Sub;

/// Largest magnitude accepted from a decimal, kept well inside i64 hundredths
const MAX_DECIMAL: f64 = 9.0e15;

/// Represents a monetary amount stored as hundredths of the currency unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from hundredths
    ///
    /// # Examples
    /// ```
    /// use wallet::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.to_string(), "10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from a decimal, rounding to two fractional digits
    ///
    /// Rounding works on the exact binary value of `value`, so `1.115` (stored
    /// as 1.11499...) becomes `1.11`. Exact ties round to even, so `0.125`
    /// becomes `0.12`.
    ///
    /// # Examples
    /// ```
    /// use wallet::models::Money;
    /// let amount = Money::from_decimal(123.456).unwrap();
    /// assert_eq!(amount.cents(), 12346);
    /// ```
    pub fn from_decimal(value: f64) -> Result<Self, MoneyParseError> {
        if !value.is_finite() {
            return Err(MoneyParseError::NotFinite);
        }
        if value.abs() > MAX_DECIMAL {
            return Err(MoneyParseError::OutOfRange(value));
        }
        // Formatting with a precision rounds the exact value, not value * 100
        let text = format!("{:.2}", value.abs());
        let (whole, frac) = text
            .split_once('.')
            .ok_or_else(|| MoneyParseError::InvalidFormat(text.clone()))?;
        let whole: i64 = whole
            .parse()
            .map_err(|_| MoneyParseError::InvalidFormat(text.clone()))?;
        let frac: i64 = frac
            .parse()
            .map_err(|_| MoneyParseError::InvalidFormat(text.clone()))?;

        let cents = whole * 100 + frac;
        Ok(Self(if value < 0.0 { -cents } else { cents }))
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in hundredths
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn whole(&self) -> i64 {
        self.0 / 100
    }

    /// Get the hundredths portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// The amount as a two-decimal number
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Check if the amount is zero
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Add two amounts, `None` on overflow
    pub const fn checked_add(self, other: Self) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Subtract two amounts, `None` on overflow
    pub const fn checked_sub(self, other: Self) -> Option<Self> {
        match self.0.checked_sub(other.0) {
            Some(cents) => Some(Self(cents)),
            None => None,
        }
    }

    /// Parse a money amount from a string
    ///
    /// Accepts any decimal number ("10.50", "-3", "1e3") and rounds it to two
    /// fractional digits.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let s = s.trim();
        let value: f64 = s
            .parse()
            .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;
        Self::from_decimal(value)
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!("-{}{}.{:02}", symbol, self.whole().abs(), self.cents_part())
        } else {
            format!("{}{}.{:02}", symbol, self.whole(), self.cents_part())
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol(""))
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_decimal(value).map_err(serde::de::Error::custom)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    NotFinite,
    OutOfRange(f64),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::NotFinite => write!(f, "Amount must be a finite number"),
            MoneyParseError::OutOfRange(v) => write!(f, "Amount out of range: {}", v),
        }
    }
}

impl std::error::Error for MoneyParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let m = Money::from_cents(1050);
        assert_eq!(m.cents(), 1050);
        assert_eq!(m.whole(), 10);
        assert_eq!(m.cents_part(), 50);
    }

    #[test]
    fn test_from_decimal_rounds() {
        assert_eq!(Money::from_decimal(123.45).unwrap().cents(), 12345);
        assert_eq!(Money::from_decimal(0.999).unwrap().cents(), 100);
        assert_eq!(Money::from_decimal(512.0).unwrap().cents(), 51200);
        assert_eq!(Money::from_decimal(0.125).unwrap().cents(), 12);
        assert_eq!(Money::from_decimal(-2.5).unwrap().cents(), -250);
        assert_eq!(Money::from_decimal(-0.0).unwrap().cents(), 0);
    }

    #[test]
    fn test_from_decimal_uses_exact_binary_value() {
        // Both literals sit just below the half cent in binary
        assert_eq!(Money::from_decimal(1.115).unwrap().cents(), 111);
        assert_eq!(Money::from_decimal(0.285).unwrap().cents(), 28);
        assert_eq!(Money::from_decimal(2.675).unwrap().cents(), 267);
        assert_eq!(Money::from_decimal(9.0e15).unwrap().cents(), 900_000_000_000_000_000);
    }

    #[test]
    fn test_from_decimal_rejects_non_finite() {
        assert_eq!(Money::from_decimal(f64::NAN), Err(MoneyParseError::NotFinite));
        assert_eq!(Money::from_decimal(f64::INFINITY), Err(MoneyParseError::NotFinite));
        assert!(matches!(
            Money::from_decimal(1e300),
            Err(MoneyParseError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1050)), "10.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
        assert_eq!(format!("{}", Money::from_cents(-1050)), "-10.50");
        assert_eq!(format!("{}", Money::from_cents(5)), "0.05");
        assert_eq!(Money::from_cents(-5).format_with_symbol("$"), "-$0.05");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a - b).cents(), 500);
        assert_eq!((b - a).cents(), -500);
    }

    #[test]
    fn test_checked_arithmetic() {
        let max = Money::from_cents(i64::MAX);
        assert_eq!(
            Money::from_cents(1).checked_add(Money::from_cents(2)),
            Some(Money::from_cents(3))
        );
        assert_eq!(max.checked_add(Money::from_cents(1)), None);
        assert_eq!(Money::from_cents(i64::MIN).checked_sub(Money::from_cents(1)), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse(" 10 ").unwrap().cents(), 1000);
        assert_eq!(Money::parse("10.5").unwrap().cents(), 1050);
        assert_eq!(Money::parse("0.05").unwrap().cents(), 5);
        assert_eq!(Money::parse("-10.50").unwrap().cents(), -1050);
        assert!(Money::parse("ten").is_err());
        assert!(Money::parse("").is_err());
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(12345);
        assert_eq!(serde_json::to_string(&m).unwrap(), "123.45");
        assert_eq!(serde_json::to_string(&Money::from_cents(51200)).unwrap(), "512.0");

        let deserialized: Money = serde_json::from_str("123.45").unwrap();
        assert_eq!(m, deserialized);

        let from_int: Money = serde_json::from_str("7").unwrap();
        assert_eq!(from_int.cents(), 700);

        let rounded: Money = serde_json::from_str("1.239").unwrap();
        assert_eq!(rounded.cents(), 124);

        let below_half: Money = serde_json::from_str("1.115").unwrap();
        assert_eq!(below_half.cents(), 111);
    }
}
