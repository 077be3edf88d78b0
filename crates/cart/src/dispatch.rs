//! UI dispatch for cart interactions.
//!
//! Each [`CartCommand`] runs to completion: store call, then a fresh
//! [`CartView`]. Failures never escape as errors. A rejected command leaves the
//! cart as it was, logs why, and hands back a notice plus a redraw of whatever
//! is persisted.

use std::fmt;

use tracing::{info, warn};

use threadline_core::{AddOutcome, CartError, LineRef, ProductRef, Size};

use crate::storage::CartStorage;
use crate::store::{CartStore, StoreError};
use crate::view::CartView;

/// Where shoppers land after completing a purchase.
pub const DEFAULT_CONFIRMATION_PATH: &str = "/checkout/complete";

/// A shopper interaction with the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    /// Add-to-cart click. `None` when the click did not come from a product card.
    Add(Option<ProductRef>),
    /// Quantity "+" on a row.
    Increment(LineRef),
    /// Quantity "-" on a row.
    Decrement(LineRef),
    /// Size selector change on a row.
    ChangeSize(LineRef, Size),
    /// Remove control on a row.
    Remove(LineRef),
    /// Purchase button.
    Purchase,
    /// Navigation to the cart page.
    OpenCart,
    /// Initial load; redraw only.
    Refresh,
}

/// Message to show the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// A product went into the cart.
    ItemAdded,
    /// Cart navigation was blocked because the cart is empty.
    CartEmpty,
    /// The addressed row no longer matches the stored cart.
    CartChanged,
    /// The command could not be carried out.
    Unavailable,
}

impl Notice {
    /// The text shown to the shopper.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::ItemAdded => "Item added to cart!",
            Self::CartEmpty => "Your cart is empty!",
            Self::CartChanged => "Your cart changed, please try again.",
            Self::Unavailable => "Something went wrong updating your cart.",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// What the page should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Stay on the current page.
    Stay,
    /// The requested navigation was refused.
    Blocked,
    /// Go to another page.
    Redirect(String),
}

/// Result of dispatching one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Fresh render of the persisted cart.
    pub view: CartView,
    pub notice: Option<Notice>,
    pub navigation: Navigation,
    /// Whether the persisted cart was written.
    pub changed: bool,
}

/// Routes cart commands to the store and redraws after each one.
#[derive(Debug)]
pub struct Dispatcher<S> {
    store: CartStore<S>,
    confirmation_path: String,
}

impl<S: CartStorage> Dispatcher<S> {
    /// Dispatcher over a store, redirecting to [`DEFAULT_CONFIRMATION_PATH`]
    /// after a purchase.
    pub fn new(store: CartStore<S>) -> Self {
        Self {
            store,
            confirmation_path: DEFAULT_CONFIRMATION_PATH.to_owned(),
        }
    }

    /// Use a different purchase confirmation destination.
    #[must_use]
    pub fn with_confirmation_path(mut self, path: impl Into<String>) -> Self {
        self.confirmation_path = path.into();
        self
    }

    /// The wrapped store.
    pub const fn store(&self) -> &CartStore<S> {
        &self.store
    }

    /// Unwrap the store.
    pub fn into_store(self) -> CartStore<S> {
        self.store
    }

    /// Run one command and redraw.
    pub fn dispatch(&mut self, command: CartCommand) -> DispatchOutcome {
        let (changed, notice, navigation) = match command {
            CartCommand::Refresh => (false, None, Navigation::Stay),
            CartCommand::OpenCart => {
                if self.store.cart().is_empty() {
                    info!("Blocked navigation to empty cart");
                    (false, Some(Notice::CartEmpty), Navigation::Blocked)
                } else {
                    (false, None, Navigation::Stay)
                }
            }
            CartCommand::Add(None) => (false, None, Navigation::Stay),
            CartCommand::Add(Some(product)) => match self.store.add_item(&product) {
                Ok(AddOutcome::Added | AddOutcome::Incremented) => {
                    (true, Some(Notice::ItemAdded), Navigation::Stay)
                }
                Err(e) => Self::rejected("add", &e),
            },
            CartCommand::Increment(line) => {
                Self::settle("increment", self.store.change_quantity(&line, 1))
            }
            CartCommand::Decrement(line) => {
                Self::settle("decrement", self.store.change_quantity(&line, -1))
            }
            CartCommand::ChangeSize(line, size) => {
                Self::settle("change size", self.store.change_size(&line, size))
            }
            CartCommand::Remove(line) => Self::settle("remove", self.store.remove_item(&line)),
            CartCommand::Purchase => match self.store.clear() {
                Ok(()) => {
                    info!("Purchase completed, cart cleared");
                    (
                        true,
                        None,
                        Navigation::Redirect(self.confirmation_path.clone()),
                    )
                }
                Err(e) => Self::rejected("purchase", &e),
            },
        };

        DispatchOutcome {
            view: CartView::render(&self.store),
            notice,
            navigation,
            changed,
        }
    }

    fn settle<T>(
        action: &str,
        result: Result<T, StoreError>,
    ) -> (bool, Option<Notice>, Navigation) {
        match result {
            Ok(_) => (true, None, Navigation::Stay),
            Err(e) => Self::rejected(action, &e),
        }
    }

    fn rejected(action: &str, error: &StoreError) -> (bool, Option<Notice>, Navigation) {
        warn!(action, error = %error, "Cart command rejected");
        let notice = match error {
            StoreError::Cart(
                CartError::InvalidReference { .. } | CartError::StaleReference { .. },
            ) => Notice::CartChanged,
            StoreError::Cart(_) | StoreError::Storage(_) | StoreError::Encode(_) => {
                Notice::Unavailable
            }
        };
        (false, Some(notice), Navigation::Stay)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn dispatcher() -> Dispatcher<MemoryStorage> {
        Dispatcher::new(CartStore::new(MemoryStorage::new()))
    }

    fn add(title: &str) -> CartCommand {
        CartCommand::Add(Some(
            ProductRef::from_display(title, "₹499", "a.png").unwrap(),
        ))
    }

    #[test]
    fn test_add_acknowledges_and_redraws() {
        let mut d = dispatcher();
        let outcome = d.dispatch(add("Tee"));

        assert!(outcome.changed);
        assert_eq!(outcome.notice, Some(Notice::ItemAdded));
        assert_eq!(outcome.navigation, Navigation::Stay);
        assert_eq!(outcome.view.rows.len(), 1);
        assert_eq!(Notice::ItemAdded.to_string(), "Item added to cart!");
    }

    #[test]
    fn test_add_without_product_is_noop() {
        let mut d = dispatcher();
        let outcome = d.dispatch(CartCommand::Add(None));
        assert!(!outcome.changed);
        assert_eq!(outcome.notice, None);
        assert!(outcome.view.is_empty());
    }

    #[test]
    fn test_open_empty_cart_is_blocked() {
        let mut d = dispatcher();
        let outcome = d.dispatch(CartCommand::OpenCart);

        assert_eq!(outcome.navigation, Navigation::Blocked);
        assert_eq!(outcome.notice, Some(Notice::CartEmpty));
        assert_eq!(outcome.notice.unwrap().message(), "Your cart is empty!");
        assert!(!outcome.changed);
        assert!(d.store().cart().is_empty());
    }

    #[test]
    fn test_open_non_empty_cart() {
        let mut d = dispatcher();
        d.dispatch(add("Tee"));
        let outcome = d.dispatch(CartCommand::OpenCart);
        assert_eq!(outcome.navigation, Navigation::Stay);
        assert_eq!(outcome.notice, None);
    }

    #[test]
    fn test_row_controls() {
        let mut d = dispatcher();
        d.dispatch(add("A"));
        let outcome = d.dispatch(add("B"));
        let row_b = outcome.view.rows[1].line_ref();

        let outcome = d.dispatch(CartCommand::Increment(row_b.clone()));
        assert_eq!(outcome.view.rows[1].quantity, 2);

        let outcome = d.dispatch(CartCommand::Decrement(row_b.clone()));
        assert_eq!(outcome.view.rows[1].quantity, 1);

        let outcome = d.dispatch(CartCommand::Decrement(row_b.clone()));
        assert_eq!(outcome.view.rows[1].quantity, 1);

        let outcome = d.dispatch(CartCommand::ChangeSize(row_b.clone(), Size::Small));
        assert_eq!(outcome.view.rows[1].size, Size::Small);

        let outcome = d.dispatch(CartCommand::Remove(row_b));
        assert_eq!(outcome.view.rows.len(), 1);
        assert_eq!(outcome.view.rows[0].title, "A");
    }

    #[test]
    fn test_stale_row_is_rejected() {
        let mut d = dispatcher();
        d.dispatch(add("A"));
        let outcome = d.dispatch(add("B"));
        let stale_b = outcome.view.rows[1].line_ref();
        let first = outcome.view.rows[0].line_ref();

        d.dispatch(CartCommand::Remove(first));
        let outcome = d.dispatch(CartCommand::Remove(stale_b));

        assert!(!outcome.changed);
        assert_eq!(outcome.notice, Some(Notice::CartChanged));
        assert_eq!(outcome.view.rows.len(), 1);
        assert_eq!(outcome.view.rows[0].title, "B");
    }

    #[test]
    fn test_purchase_clears_and_redirects() {
        let mut d = dispatcher().with_confirmation_path("/thanks");
        d.dispatch(add("A"));
        d.dispatch(add("B"));

        let outcome = d.dispatch(CartCommand::Purchase);
        assert!(outcome.changed);
        assert_eq!(outcome.navigation, Navigation::Redirect("/thanks".to_owned()));
        assert!(outcome.view.is_empty());
        assert_eq!(outcome.view.total_display, "₹0");

        let refreshed = d.dispatch(CartCommand::Refresh);
        assert!(refreshed.view.rows.is_empty());
    }

    #[test]
    fn test_default_confirmation_path() {
        let mut d = dispatcher();
        let outcome = d.dispatch(CartCommand::Purchase);
        assert_eq!(
            outcome.navigation,
            Navigation::Redirect(DEFAULT_CONFIRMATION_PATH.to_owned())
        );
    }
}
