//! Type-safe price representation using decimal arithmetic.
//!
//! Prices arrive from the catalog as display strings (`"₹499"`) and are stored
//! in the cart as decimal strings. Arithmetic saturates instead of panicking so
//! a hostile persisted value can never take the process down.

use core::fmt;
use core::iter::Sum;
use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Glyph prefixed to prices when they are formatted for display.
pub const CURRENCY_GLYPH: &str = "₹";

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// Nothing numeric was left after stripping the currency glyph.
    #[error("price cannot be empty")]
    Empty,
    /// The remaining text is not a decimal number.
    #[error("price is not a valid number: {0}")]
    Invalid(String),
    /// Prices are never negative.
    #[error("price cannot be negative")]
    Negative,
}

/// A non-negative, currency-agnostic unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// Parse a price from a display string such as `"₹ 1,299.50"`.
    ///
    /// Leading currency glyphs, surrounding whitespace and grouping commas are
    /// stripped before the remainder is parsed as a decimal.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing numeric remains, the remainder is not a
    /// decimal, or the value is negative.
    pub fn parse_display(s: &str) -> Result<Self, PriceError> {
        let stripped = s
            .trim()
            .trim_start_matches(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+')))
            .trim();
        let cleaned: String = stripped.chars().filter(|c| *c != ',').collect();

        if cleaned.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount =
            Decimal::from_str(&cleaned).map_err(|_| PriceError::Invalid(s.trim().to_owned()))?;
        Self::new(amount)
    }

    /// Returns the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }

    /// Sum of two prices.
    #[must_use]
    pub fn plus(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Format for display with the currency glyph (e.g., `"₹499"`).
    #[must_use]
    pub fn display(&self) -> String {
        format!("{CURRENCY_GLYPH}{}", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_display(s)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::plus)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Stored carts written by older clients hold either form.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        let parsed = match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self::parse_display(&text),
            Raw::Number(number) => Self::parse_display(&number.to_string()),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}
