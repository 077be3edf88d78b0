//! Review star rating.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`Rating`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RatingError {
    /// The value falls outside the star scale.
    #[error("rating must be between {min} and {max} (got {got})")]
    OutOfRange {
        /// Lowest accepted rating.
        min: i16,
        /// Highest accepted rating.
        max: i16,
        /// Rejected value.
        got: i64,
    },
}

/// A review rating from one to five stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i16")]
pub struct Rating(i16);

impl Rating {
    /// Lowest rating.
    pub const MIN: i16 = 1;
    /// Highest rating.
    pub const MAX: i16 = 5;

    /// Create a rating.
    ///
    /// # Errors
    ///
    /// Returns `RatingError::OutOfRange` outside `1..=5`.
    pub fn new(value: i64) -> Result<Self, RatingError> {
        i16::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(RatingError::OutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                got: value,
            })
    }

    /// Returns the number of stars.
    #[must_use]
    pub const fn get(&self) -> i16 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<i64> for Rating {
    type Error = RatingError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Rating> for i16 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}
