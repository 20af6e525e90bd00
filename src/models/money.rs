//! Money type for ledger amounts
//!
//! Internally stores amounts in minor units (paise/cents, i64) so that daily
//! and per-frequency sums are exact. Provides arithmetic, parsing of
//! spreadsheet-style amount text, and grouped formatting for display.

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign};

/// A monetary amount stored as hundredths of the currency unit
///
/// Serializes as a decimal number of whole units (`10.5` for 10.50).
/// Deserializes from a number of whole units or from amount text accepted
/// by [`Money::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from minor units
    ///
    /// # Examples
    /// ```
    /// use loan_ledger::models::Money;
    /// let amount = Money::from_cents(1050); // 10.50
    /// assert_eq!(amount.units(), 10);
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Create a Money amount from whole units, saturating at the i64 bounds
    pub const fn from_units(units: i64) -> Self {
        Self(units.saturating_mul(100))
    }

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in minor units
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole units portion (truncated toward zero)
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Get the minor units portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// The amount as a float, for proportional rendering only
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Whole units rounded half away from zero
    pub const fn rounded_units(&self) -> i64 {
        let whole = self.0 / 100;
        let rem = self.0 % 100;
        if rem >= 50 {
            whole + 1
        } else if rem <= -50 {
            whole - 1
        } else {
            whole
        }
    }

    /// Parse an amount from spreadsheet text
    ///
    /// Accepts "10.50", "-10.50", "₹1,250", "$ 10", "Rs. 99", "(10.00)"
    /// (accounting negative) and scientific notation such as "1E+05".
    /// Digits past the second decimal place round half up. Anything else,
    /// including an amount too large for the ledger, is rejected.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let original = s.trim();
        let invalid = || MoneyParseError::InvalidFormat(original.to_string());

        let (mut negative, text) = match original
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
        {
            Some(inner) => (true, inner.trim()),
            None => (false, original),
        };
        let mut text = match text.strip_prefix('-') {
            Some(rest) if !negative => {
                negative = true;
                rest.trim_start()
            }
            _ => text,
        };

        text = strip_currency_prefix(text);
        if !negative {
            if let Some(rest) = text.strip_prefix('-') {
                negative = true;
                text = rest;
            }
        }

        let body: String = text
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .collect();

        let cents = decimal_to_cents(&body).ok_or_else(invalid)?;
        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Format with a currency symbol, thousands separators and two decimals
    ///
    /// `Money::from_cents(123456789).format_grouped("₹")` gives `₹1,234,567.89`.
    pub fn format_grouped(&self, symbol: &str) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            group_thousands(self.units().unsigned_abs()),
            self.cents_part()
        )
    }

    /// Format as rounded whole units with thousands separators
    pub fn format_whole(&self, symbol: &str) -> String {
        let rounded = self.rounded_units();
        let sign = if rounded < 0 { "-" } else { "" };
        format!("{}{}{}", sign, symbol, group_thousands(rounded.unsigned_abs()))
    }
}

/// Largest exponent magnitude accepted in scientific notation
const MAX_EXPONENT: i32 = 64;

/// Drop a leading currency marker: any run of non-ASCII symbols or `$`,
/// or one of the ASCII prefixes "Rs.", "Rs" and "INR"
fn strip_currency_prefix(text: &str) -> &str {
    let text = text.trim_start_matches(|c: char| c == '$' || !c.is_ascii());
    for prefix in ["rs.", "inr", "rs"] {
        if text.len() >= prefix.len()
            && text.is_char_boundary(prefix.len())
            && text[..prefix.len()].eq_ignore_ascii_case(prefix)
        {
            return text[prefix.len()..].trim_start();
        }
    }
    text.trim_start()
}

/// Convert an unsigned decimal ("12", "12.345", ".5", "1.5E+03") to
/// hundredths, rounding half up; `None` for malformed text or overflow
fn decimal_to_cents(body: &str) -> Option<i64> {
    let (mantissa, exponent) = match body.find(['e', 'E']) {
        Some(pos) => (&body[..pos], body[pos + 1..].parse::<i32>().ok()?),
        None => (body, 0),
    };
    if exponent.abs() > MAX_EXPONENT {
        return None;
    }
    let (whole, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    // Position of the point after shifting to hundredths
    let digits: Vec<i64> = whole
        .bytes()
        .chain(frac.bytes())
        .map(|b| i64::from(b - b'0'))
        .collect();
    let point = whole.len() as i64 + i64::from(exponent) + 2;

    let mut cents: i64 = 0;
    if point > 0 {
        for i in 0..point {
            let digit = usize::try_from(i)
                .ok()
                .and_then(|i| digits.get(i))
                .copied()
                .unwrap_or(0);
            cents = cents.checked_mul(10)?.checked_add(digit)?;
        }
    }

    let round_digit = usize::try_from(point)
        .ok()
        .and_then(|i| digits.get(i))
        .copied()
        .unwrap_or(0);
    if round_digit >= 5 {
        cents = cents.checked_add(1)?;
    }
    Some(cents)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

/// Plain decimal form ("1234.50"), used in CSV exports
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-{}.{:02}", self.units().abs(), self.cents_part())
        } else {
            write!(f, "{}.{:02}", self.units(), self.cents_part())
        }
    }
}

/// Saturates at the i64 bounds rather than wrapping
impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an amount in whole units, as a number or decimal text")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        v.checked_mul(100)
            .map(Money)
            .ok_or_else(|| E::custom(format!("amount out of range: {}", v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        i64::try_from(v)
            .ok()
            .and_then(|v| v.checked_mul(100))
            .map(Money)
            .ok_or_else(|| E::custom(format!("amount out of range: {}", v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        let cents = (v * 100.0).round();
        if cents.is_finite() && cents.abs() < MAX_CENTS_F64 {
            Ok(Money(cents as i64))
        } else {
            Err(E::custom(format!("amount out of range: {}", v)))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        Money::parse(v).map_err(E::custom)
    }
}

/// Below `i64::MAX`, so the cast in `visit_f64` cannot saturate
const MAX_CENTS_F64: f64 = 9.0e18;

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: '{}'", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
