//! Account and contact email addresses.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why a string was not accepted as an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,
    #[error("email must be at most {max} characters")]
    TooLong { max: usize },
    #[error("email cannot contain whitespace")]
    Whitespace,
    #[error("email must contain exactly one @")]
    AtSymbol,
    #[error("email needs a name before the @")]
    EmptyLocalPart,
    #[error("email domain must look like example.com")]
    InvalidDomain,
}

/// An email address as accepted at sign-up and on the contact form.
///
/// The check is structural only: one `@`, something before it, and a dotted
/// domain after it. Whether the mailbox exists is never asked.
///
/// ```
/// use threadline_core::Email;
///
/// assert_eq!(Email::parse("asha@example.com").unwrap().as_str(), "asha@example.com");
/// assert!(Email::parse("asha@localhost").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct Email(String);

impl Email {
    /// RFC 5321 path limit.
    pub const MAX_LENGTH: usize = 254;

    /// Accept `s` verbatim if it is shaped like an address.
    ///
    /// Callers trim user input first; surrounding spaces are rejected here.
    ///
    /// # Errors
    ///
    /// Returns the first [`EmailError`] the input trips over.
    pub fn parse(s: &str) -> Result<Self, EmailError> {
        if s.is_empty() {
            return Err(EmailError::Empty);
        }
        if s.len() > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        if s.chars().any(char::is_whitespace) {
            return Err(EmailError::Whitespace);
        }

        let (local, domain) = s.split_once('@').ok_or(EmailError::AtSymbol)?;
        if domain.contains('@') {
            return Err(EmailError::AtSymbol);
        }
        if local.is_empty() {
            return Err(EmailError::EmptyLocalPart);
        }
        let dotted = domain
            .split('.')
            .try_fold(0_usize, |labels, label| {
                (!label.is_empty()).then_some(labels + 1)
            })
            .is_some_and(|labels| labels >= 2);
        if !dotted {
            return Err(EmailError::InvalidDomain);
        }

        Ok(Self(s.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = EmailError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_everyday_addresses() {
        for s in [
            "asha@example.com",
            "asha.rao+orders@mail.example.co.in",
            "a@b.io",
        ] {
            assert_eq!(Email::parse(s).unwrap().as_str(), s);
        }
    }

    #[test]
    fn test_rejections() {
        let cases = [
            ("", EmailError::Empty),
            ("asha", EmailError::AtSymbol),
            ("asha@@example.com", EmailError::AtSymbol),
            ("a@b@example.com", EmailError::AtSymbol),
            ("@example.com", EmailError::EmptyLocalPart),
            ("asha@", EmailError::InvalidDomain),
            ("asha@localhost", EmailError::InvalidDomain),
            ("asha@example.", EmailError::InvalidDomain),
            ("asha@.example.com", EmailError::InvalidDomain),
            (" asha@example.com", EmailError::Whitespace),
            ("asha rao@example.com", EmailError::Whitespace),
        ];
        for (input, expected) in cases {
            assert_eq!(Email::parse(input), Err(expected), "{input:?}");
        }
    }

    #[test]
    fn test_length_limit() {
        let at_limit = format!("{}@example.com", "a".repeat(Email::MAX_LENGTH - 12));
        assert!(Email::parse(&at_limit).is_ok());

        let over = format!("a{at_limit}");
        assert_eq!(
            Email::parse(&over),
            Err(EmailError::TooLong {
                max: Email::MAX_LENGTH
            })
        );
    }

    #[test]
    fn test_json_is_a_plain_string() {
        let email = Email::parse("asha@example.com").unwrap();
        assert_eq!(
            serde_json::to_value(&email).unwrap(),
            serde_json::json!("asha@example.com")
        );
        assert_eq!(email.to_string(), "asha@example.com");
    }

    #[test]
    fn test_deserializing_validates() {
        let parsed: Email = serde_json::from_str(r#""asha@example.com""#).unwrap();
        assert_eq!(parsed.as_str(), "asha@example.com");
        assert!(serde_json::from_str::<Email>(r#""not-an-email""#).is_err());
    }
}
