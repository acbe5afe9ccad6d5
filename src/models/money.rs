//! Money type for representing currency amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point precision
//! issues. Provides checked parsing, arithmetic, and formatting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Smallest amount accepted for expenses and budgets
    pub const MIN_AMOUNT: Money = Money(1);

    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense_tracker::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// assert_eq!(amount.to_string(), "$10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole dollars portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Check if the amount is negative
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Add two amounts, `None` on overflow
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Parse a decimal amount such as `"3.50"`, `"12"`, `".75"`, `"+4.2"` or `"1e2"`
    ///
    /// Digits past the second fractional place round half-up to the nearest
    /// cent. An exponent (`e`/`E`, optionally signed) scales the value. Minus
    /// signs, thousands separators and currency symbols are rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let parsed = parse_decimal(s)?;
        let cents = if parsed.round_up {
            parsed.truncated.checked_add(1)
        } else {
            Some(parsed.truncated)
        };
        cents
            .map(Self)
            .ok_or_else(|| MoneyParseError::Overflow(s.to_string()))
    }

    /// Parse a user-supplied amount that must be at least one cent
    ///
    /// The threshold is checked on the value as written, before rounding, so
    /// `"0.005"` is rejected even though it would round up to a cent.
    pub fn parse_positive(s: &str) -> Result<Self, MoneyParseError> {
        let amount = Self::parse(s)?;
        if parse_decimal(s)?.truncated < Self::MIN_AMOUNT.0 {
            return Err(MoneyParseError::BelowMinimum(s.to_string()));
        }
        Ok(amount)
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!(
                "-{}{}.{:02}",
                symbol,
                self.dollars().abs(),
                self.cents_part()
            )
        } else {
            format!("{}{}.{:02}", symbol, self.dollars(), self.cents_part())
        }
    }

    /// Format as a bare decimal number (no symbol), e.g. `3.50`
    pub fn format_plain(&self) -> String {
        self.format_with_symbol("")
    }
}

/// A decimal string cut to whole cents, plus whether the dropped digits round up
struct ParsedDecimal {
    truncated: i64,
    round_up: bool,
}

/// Exponents beyond this only ever overflow or round to zero
const MAX_EXPONENT: i64 = 64;

fn parse_decimal(s: &str) -> Result<ParsedDecimal, MoneyParseError> {
    let invalid = || MoneyParseError::InvalidFormat(s.to_string());
    let overflow = || MoneyParseError::Overflow(s.to_string());

    let trimmed = s.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);

    let (mantissa, exponent) = match unsigned.split_once(|c: char| c == 'e' || c == 'E') {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (unsigned, None),
    };

    let (whole, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if whole.is_empty() && frac.is_empty() {
        return Err(invalid());
    }
    if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let exponent = match exponent {
        None => 0,
        Some(exp) => {
            let (negative, digits) = match exp.strip_prefix('-') {
                Some(digits) => (true, digits),
                None => (false, exp.strip_prefix('+').unwrap_or(exp)),
            };
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            let magnitude = digits.parse::<i64>().map_or(MAX_EXPONENT, |e| e.min(MAX_EXPONENT));
            if negative {
                -magnitude
            } else {
                magnitude
            }
        }
    };

    let digits: Vec<i64> = whole
        .bytes()
        .chain(frac.bytes())
        .map(|b| i64::from(b - b'0'))
        .collect();
    let digit = |i: i64| {
        usize::try_from(i)
            .ok()
            .and_then(|i| digits.get(i).copied())
            .unwrap_or(0)
    };

    // Index one past the hundredths digit, counted from the first digit written
    let cents_end = whole.len() as i64 + exponent + 2;

    let mut truncated: i64 = 0;
    for i in 0..cents_end.max(0) {
        truncated = truncated
            .checked_mul(10)
            .and_then(|c| c.checked_add(digit(i)))
            .ok_or_else(overflow)?;
    }

    Ok(ParsedDecimal {
        truncated,
        round_up: digit(cents_end) >= 5,
    })
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    Overflow(String),
    BelowMinimum(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::Overflow(s) => write!(f, "Amount out of range: {}", s),
            MoneyParseError::BelowMinimum(s) => write!(f, "Amount below $0.01: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
