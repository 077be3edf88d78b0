//! Garment sizes offered for every cart line.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing a [`Size`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SizeError {
    /// The label is not one of the offered sizes.
    #[error("unknown size: {0:?} (expected one of S, M, L, XL, XXL, 3XL, 4XL)")]
    Unknown(String),
}

/// A garment size.
///
/// Serialized with its display label (`"S"`, `"3XL"`, ...). New cart lines
/// default to [`Size::Medium`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Size {
    Small,
    #[default]
    Medium,
    Large,
    ExtraLarge,
    DoubleExtraLarge,
    TripleExtraLarge,
    QuadrupleExtraLarge,
}

impl Size {
    /// Every size, in the order selectors list them.
    pub const ALL: [Self; 7] = [
        Self::Small,
        Self::Medium,
        Self::Large,
        Self::ExtraLarge,
        Self::DoubleExtraLarge,
        Self::TripleExtraLarge,
        Self::QuadrupleExtraLarge,
    ];

    /// The display label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "S",
            Self::Medium => "M",
            Self::Large => "L",
            Self::ExtraLarge => "XL",
            Self::DoubleExtraLarge => "XXL",
            Self::TripleExtraLarge => "3XL",
            Self::QuadrupleExtraLarge => "4XL",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Size {
    type Err = SizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        Self::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(label))
            .ok_or_else(|| SizeError::Unknown(label.to_owned()))
    }
}

impl Serialize for Size {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Size {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_medium() {
        assert_eq!(Size::default(), Size::Medium);
    }

    #[test]
    fn test_parse_every_label() {
        for size in Size::ALL {
            assert_eq!(size.as_str().parse::<Size>().unwrap(), size);
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("xxl".parse::<Size>().unwrap(), Size::DoubleExtraLarge);
        assert_eq!(" 3xl ".parse::<Size>().unwrap(), Size::TripleExtraLarge);
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!("5XL".parse::<Size>(), Err(SizeError::Unknown(_))));
        assert!(matches!("".parse::<Size>(), Err(SizeError::Unknown(_))));
    }

    #[test]
    fn test_serde_uses_labels() {
        assert_eq!(
            serde_json::to_string(&Size::QuadrupleExtraLarge).unwrap(),
            "\"4XL\""
        );
        let size: Size = serde_json::from_str("\"XL\"").unwrap();
        assert_eq!(size, Size::ExtraLarge);
        assert!(serde_json::from_str::<Size>("\"XS\"").is_err());
    }
}
