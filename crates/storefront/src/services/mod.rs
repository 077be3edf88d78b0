//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Password registration and login

pub mod auth;

pub use auth::{AuthError, AuthService, Registration};
