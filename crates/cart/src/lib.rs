//! Threadline cart.
//!
//! The cart subsystem has three parts:
//!
//! - [`CartStore`] - single source of truth for cart contents. Every mutation
//!   reads the full persisted cart, applies one change and writes the full cart
//!   back through a [`CartStorage`] back-end.
//! - [`CartView`] - re-derives the displayed rows and total from the store on
//!   every redraw; it never keeps its own copy.
//! - [`Dispatcher`] - the thin UI adapter that turns a [`CartCommand`] into a
//!   store call followed by a redraw, and guards navigation to an empty cart.
//!
//! # Persisted layout
//!
//! ```text
//! key:   "cart"
//! value: [{ "title": "Tee", "price": "499", "imageSrc": "a.png",
//!           "quantity": 2, "size": "M" }, ...]
//! ```
//!
//! A missing key is an empty cart. A value that does not parse as a cart is
//! also treated as empty (and logged), so a corrupted store never blocks the
//! shopper.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod dispatch;
pub mod storage;
pub mod store;
pub mod view;

pub use dispatch::{
    CartCommand, DEFAULT_CONFIRMATION_PATH, DispatchOutcome, Dispatcher, Navigation, Notice,
};
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::{CART_KEY, CartStore, StoreError};
pub use view::{CartRow, CartView, SizeOption};
