//! Line quantity with a floor of one.

use core::fmt;
use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    /// Cart lines always hold at least one unit.
    #[error("quantity must be at least 1")]
    Zero,
}

/// Number of units on a cart line. Never below one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(NonZeroU32);

impl Quantity {
    /// A single unit.
    pub const ONE: Self = Self(NonZeroU32::MIN);

    /// Create a quantity.
    ///
    /// # Errors
    ///
    /// Returns `QuantityError::Zero` for zero.
    pub const fn new(value: u32) -> Result<Self, QuantityError> {
        match NonZeroU32::new(value) {
            Some(value) => Ok(Self(value)),
            None => Err(QuantityError::Zero),
        }
    }

    /// Returns the unit count.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0.get()
    }

    /// Apply a signed change, clamping to `1..=u32::MAX`.
    #[must_use]
    pub fn adjusted(self, delta: i64) -> Self {
        let target = i64::from(self.get()).saturating_add(delta);
        let clamped = u32::try_from(target.max(1)).unwrap_or(u32::MAX);
        NonZeroU32::new(clamped).map_or(Self::ONE, Self)
    }

    /// One more unit.
    #[must_use]
    pub fn incremented(self) -> Self {
        self.adjusted(1)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.get()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_rejected() {
        assert_eq!(Quantity::new(0), Err(QuantityError::Zero));
    }

    #[test]
    fn test_adjusted_floor() {
        let one = Quantity::ONE;
        assert_eq!(one.adjusted(-1).get(), 1);
        assert_eq!(Quantity::new(5).unwrap().adjusted(-3).get(), 2);
        assert_eq!(Quantity::new(5).unwrap().adjusted(i64::MIN).get(), 1);
    }

    #[test]
    fn test_adjusted_ceiling() {
        let max = Quantity::new(u32::MAX).unwrap();
        assert_eq!(max.incremented().get(), u32::MAX);
        assert_eq!(Quantity::ONE.adjusted(i64::MAX).get(), u32::MAX);
    }

    #[test]
    fn test_serde() {
        let quantity: Quantity = serde_json::from_str("3").unwrap();
        assert_eq!(quantity.get(), 3);
        assert_eq!(serde_json::to_string(&quantity).unwrap(), "3");
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert!(serde_json::from_str::<Quantity>("-2").is_err());
    }
}
