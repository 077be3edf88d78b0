//! Core types for Threadline.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod email;
pub mod id;
pub mod price;
pub mod quantity;
pub mod rating;
pub mod size;

pub use cart::{AddOutcome, Cart, CartError, CartItem, LineRef, ProductRef};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CURRENCY_GLYPH, Price, PriceError};
pub use quantity::{Quantity, QuantityError};
pub use rating::{Rating, RatingError};
pub use size::{Size, SizeError};
