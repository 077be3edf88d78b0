//! Domain models for storefront.

pub mod checkout;
pub mod message;
pub mod review;
pub mod session;
pub mod user;

pub use checkout::CheckoutDetails;
pub use message::ContactMessage;
pub use review::{NewReview, Review};
pub use session::{CurrentUser, keys as session_keys};
pub use user::{NewUser, User};

use serde::Serialize;

/// JSON body returned by the form and API endpoints.
///
/// `redirectUrl` tells the page where to go next, when anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiMessage {
    pub message: String,
    #[serde(rename = "redirectUrl", skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

impl ApiMessage {
    /// A message with no follow-up navigation.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            redirect_url: None,
        }
    }

    /// A message telling the page to navigate to `url`.
    #[must_use]
    pub fn redirect(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            redirect_url: Some(url.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_api_message_omits_missing_redirect() {
        let json = serde_json::to_string(&ApiMessage::new("Review saved successfully")).unwrap();
        assert_eq!(json, r#"{"message":"Review saved successfully"}"#);
    }

    #[test]
    fn test_api_message_redirect_field_name() {
        let json = serde_json::to_value(ApiMessage::redirect("Login successful!", "/")).unwrap();
        assert_eq!(json["redirectUrl"], "/");
        assert_eq!(json["message"], "Login successful!");
    }
}
