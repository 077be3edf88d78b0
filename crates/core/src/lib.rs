//! Threadline Core - Shared types library.
//!
//! This crate provides common types used across all Threadline components:
//! - `cart` - Persisted cart store, view renderer and UI dispatch
//! - `storefront` - Public-facing shop server
//! - `cli` - Command-line tools for migrations and driving a local cart
//!
//! # Architecture
//!
//! The core crate contains only types and the pure cart state machine - no I/O,
//! no database access, no HTTP. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Prices, sizes, quantities, cart lines, emails, ratings and IDs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
