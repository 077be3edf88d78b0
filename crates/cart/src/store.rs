//! The cart store.
//!
//! Every mutation is a read-modify-write over the whole persisted cart: read
//! the `"cart"` key, apply exactly one change, write the full cart back. A
//! failed change writes nothing.

use thiserror::Error;
use tracing::{debug, warn};

use threadline_core::{
    AddOutcome, Cart, CartError, CartItem, LineRef, Price, ProductRef, Quantity, Size,
};

use crate::storage::{CartStorage, StorageError};

/// Storage key holding the persisted cart.
pub const CART_KEY: &str = "cart";

/// Errors raised by cart store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The operation was rejected by the cart rules.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The storage back-end failed.
    #[error("cart storage failed: {0}")]
    Storage(#[from] StorageError),

    /// The cart could not be encoded for storage.
    #[error("could not encode cart: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Single source of truth for cart contents.
#[derive(Debug, Clone, Default)]
pub struct CartStore<S> {
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Wrap a storage back-end.
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// The underlying storage.
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Unwrap the underlying storage.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Read the persisted cart.
    ///
    /// A missing or malformed value reads as an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only if the back-end itself cannot be read.
    pub fn try_cart(&self) -> Result<Cart, StorageError> {
        let Some(raw) = self.storage.get(CART_KEY)? else {
            return Ok(Cart::new());
        };

        match serde_json::from_str::<Cart>(&raw) {
            Ok(cart) => Ok(cart),
            Err(e) => {
                warn!(error = %e, "Persisted cart is malformed, treating it as empty");
                Ok(Cart::new())
            }
        }
    }

    /// Read the persisted cart for display.
    ///
    /// Storage failures are logged and read as an empty cart.
    pub fn cart(&self) -> Cart {
        self.try_cart().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read cart storage");
            Cart::new()
        })
    }

    /// Add one unit of a product.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Cart` for a blank title, or a storage error.
    pub fn add_item(&mut self, product: &ProductRef) -> Result<AddOutcome, StoreError> {
        let outcome = self.transact(|cart| cart.add(product))?;
        debug!(title = %product.title, ?outcome, "Added product to cart");
        Ok(outcome)
    }

    /// Change a line's quantity by `delta`; the result never drops below one.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Cart` if `line` does not resolve, or a storage error.
    pub fn change_quantity(&mut self, line: &LineRef, delta: i64) -> Result<Quantity, StoreError> {
        let quantity = self.transact(|cart| cart.change_quantity(line, delta))?;
        debug!(index = line.index(), delta, quantity = quantity.get(), "Changed quantity");
        Ok(quantity)
    }

    /// Change a line's size, returning the previous size.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Cart` if `line` does not resolve, or a storage error.
    pub fn change_size(&mut self, line: &LineRef, size: Size) -> Result<Size, StoreError> {
        let previous = self.transact(|cart| cart.change_size(line, size))?;
        debug!(index = line.index(), %previous, %size, "Changed size");
        Ok(previous)
    }

    /// Remove a line, returning it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Cart` if `line` does not resolve, or a storage error.
    pub fn remove_item(&mut self, line: &LineRef) -> Result<CartItem, StoreError> {
        let removed = self.transact(|cart| cart.remove(line))?;
        debug!(index = line.index(), title = %removed.title, "Removed cart line");
        Ok(removed)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the key cannot be deleted.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.storage.remove(CART_KEY)?;
        debug!("Cleared cart");
        Ok(())
    }

    /// Sum of unit price times quantity over the persisted cart.
    pub fn compute_total(&self) -> Price {
        self.cart().total()
    }

    fn transact<T>(
        &mut self,
        change: impl FnOnce(&mut Cart) -> Result<T, CartError>,
    ) -> Result<T, StoreError> {
        let mut cart = self.try_cart()?;
        let result = change(&mut cart)?;
        let encoded = serde_json::to_string(&cart)?;
        self.storage.set(CART_KEY, &encoded)?;
        Ok(result)
    }
}
