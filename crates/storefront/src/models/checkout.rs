//! Checkout details captured before the confirmation page.

use serde::Deserialize;

/// Shipping and payment details from the checkout form.
///
/// Every field is optional on the wire so that an empty submission can be
/// told apart from a malformed one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckoutDetails {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub phone: String,
    pub payment: String,
}

impl CheckoutDetails {
    /// Whether nothing at all was submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        [
            &self.name,
            &self.address,
            &self.city,
            &self.state,
            &self.pincode,
            &self.phone,
            &self.payment,
        ]
        .iter()
        .all(|field| field.trim().is_empty())
    }
}
