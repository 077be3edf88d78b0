//! Session-related types.
//!
//! Types stored in the session for authentication and cart state.

use serde::{Deserialize, Serialize};

use threadline_core::{Email, UserId};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// Display name given at registration.
    pub name: String,
    /// User's email address.
    pub email: Email,
    /// Account kind chosen at registration.
    pub user_type: String,
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key holding the visitor's cart, in the shared persisted layout.
    pub const CART: &str = threadline_cart::CART_KEY;
}
