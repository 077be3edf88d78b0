//! User domain types.
//!
//! These types represent validated domain objects separate from database row types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use threadline_core::{Email, UserId};

/// A registered storefront user.
///
/// Serializes without any password material; this is what `/profile` returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub user_type: String,
    pub created_at: DateTime<Utc>,
}

/// Validated registration data, ready to insert.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub user_type: String,
}
