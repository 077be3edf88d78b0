//! Cart lines and the cart state machine.
//!
//! A [`Cart`] is an ordered list of [`CartItem`]s keyed by product title. The
//! operations here are pure; persistence lives in the `threadline-cart` crate,
//! which reads a whole cart, applies one operation and writes it back.
//!
//! Mutations address a line with a [`LineRef`]: the row's position as it was
//! rendered, optionally paired with the title the caller saw there. When the
//! title no longer matches (the cart changed underneath the caller) the
//! operation fails instead of touching a different line.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::price::{Price, PriceError};
use super::quantity::Quantity;
use super::size::Size;

/// Errors raised by cart operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// Products are keyed by title, so the title must not be blank.
    #[error("product title cannot be empty")]
    EmptyTitle,

    /// The position does not address any line.
    #[error("no cart line at position {index} (cart has {len} lines)")]
    InvalidReference {
        /// Requested position.
        index: usize,
        /// Number of lines in the cart.
        len: usize,
    },

    /// The line at the position is not the one the caller expected.
    #[error("cart line {index} is {found:?}, expected {expected:?}")]
    StaleReference {
        /// Requested position.
        index: usize,
        /// Title the caller rendered at that position.
        expected: String,
        /// Title currently stored there.
        found: String,
    },

    /// Two lines share a title.
    #[error("duplicate cart line for {0:?}")]
    DuplicateTitle(String),
}

/// Product data extracted from a catalog card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    pub title: String,
    pub price: Price,
    pub image_url: String,
}

impl ProductRef {
    /// Build a product reference from the strings a catalog card displays.
    ///
    /// The title is trimmed and the price has its currency glyph stripped.
    ///
    /// # Errors
    ///
    /// Returns a `PriceError` if the price text is not a valid price.
    pub fn from_display(
        title: &str,
        price_text: &str,
        image_url: &str,
    ) -> Result<Self, PriceError> {
        Ok(Self {
            title: title.trim().to_owned(),
            price: Price::parse_display(price_text)?,
            image_url: image_url.trim().to_owned(),
        })
    }
}

/// One line of the cart.
///
/// The serialized field names (`price`, `imageSrc`) are the persisted layout
/// shared with every cart back-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub title: String,
    #[serde(rename = "price")]
    pub unit_price: Price,
    #[serde(rename = "imageSrc")]
    pub image_url: String,
    pub quantity: Quantity,
    #[serde(default)]
    pub size: Size,
}

impl CartItem {
    /// A fresh line for a product: one unit, default size.
    #[must_use]
    pub fn new(product: &ProductRef) -> Self {
        Self {
            title: product.title.clone(),
            unit_price: product.price,
            image_url: product.image_url.clone(),
            quantity: Quantity::ONE,
            size: Size::default(),
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity.get())
    }
}

/// Positional reference to a rendered cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineRef {
    index: usize,
    expected_title: Option<String>,
}

impl LineRef {
    /// Address the line at `index` without an identity check.
    #[must_use]
    pub const fn at(index: usize) -> Self {
        Self {
            index,
            expected_title: None,
        }
    }

    /// Require the addressed line to still carry `title`.
    #[must_use]
    pub fn expecting(mut self, title: impl Into<String>) -> Self {
        self.expected_title = Some(title.into());
        self
    }

    /// The addressed position.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The title the caller expects at the position, if any.
    #[must_use]
    pub fn expected_title(&self) -> Option<&str> {
        self.expected_title.as_deref()
    }
}

/// What `Cart::add` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended.
    Added,
    /// An existing line gained one unit.
    Incremented,
}

/// Ordered cart lines with unique titles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from stored lines, checking titles.
    ///
    /// # Errors
    ///
    /// Returns `CartError::EmptyTitle` or `CartError::DuplicateTitle` if the
    /// lines break the one-line-per-title rule.
    pub fn from_items(items: Vec<CartItem>) -> Result<Self, CartError> {
        for (position, item) in items.iter().enumerate() {
            if item.title.trim().is_empty() {
                return Err(CartError::EmptyTitle);
            }
            if items
                .iter()
                .take(position)
                .any(|earlier| earlier.title == item.title)
            {
                return Err(CartError::DuplicateTitle(item.title.clone()));
            }
        }
        Ok(Self { items })
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity.get()))
            .sum()
    }

    /// Find the line for a title.
    #[must_use]
    pub fn find(&self, title: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.title == title)
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart keeps its size and price; only its
    /// quantity grows. Otherwise a new line is appended with one unit in the
    /// default size.
    ///
    /// # Errors
    ///
    /// Returns `CartError::EmptyTitle` if the product title is blank.
    pub fn add(&mut self, product: &ProductRef) -> Result<AddOutcome, CartError> {
        if product.title.trim().is_empty() {
            return Err(CartError::EmptyTitle);
        }

        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|item| item.title == product.title)
        {
            existing.quantity = existing.quantity.incremented();
            return Ok(AddOutcome::Incremented);
        }

        self.items.push(CartItem::new(product));
        Ok(AddOutcome::Added)
    }

    /// Change a line's quantity by `delta`, never going below one.
    ///
    /// # Errors
    ///
    /// Returns an error if `line` does not resolve.
    pub fn change_quantity(&mut self, line: &LineRef, delta: i64) -> Result<Quantity, CartError> {
        let item = self.resolve_mut(line)?;
        item.quantity = item.quantity.adjusted(delta);
        Ok(item.quantity)
    }

    /// Change a line's size, returning the previous size.
    ///
    /// # Errors
    ///
    /// Returns an error if `line` does not resolve.
    pub fn change_size(&mut self, line: &LineRef, size: Size) -> Result<Size, CartError> {
        let item = self.resolve_mut(line)?;
        Ok(std::mem::replace(&mut item.size, size))
    }

    /// Remove a line; later lines move up one position.
    ///
    /// # Errors
    ///
    /// Returns an error if `line` does not resolve.
    pub fn remove(&mut self, line: &LineRef) -> Result<CartItem, CartError> {
        let index = self.resolve(line)?;
        Ok(self.items.remove(index))
    }

    /// Drop every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    fn resolve(&self, line: &LineRef) -> Result<usize, CartError> {
        let item = self
            .items
            .get(line.index)
            .ok_or(CartError::InvalidReference {
                index: line.index,
                len: self.items.len(),
            })?;

        if let Some(expected) = line.expected_title()
            && expected != item.title
        {
            return Err(CartError::StaleReference {
                index: line.index,
                expected: expected.to_owned(),
                found: item.title.clone(),
            });
        }

        Ok(line.index)
    }

    fn resolve_mut(&mut self, line: &LineRef) -> Result<&mut CartItem, CartError> {
        let index = self.resolve(line)?;
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(CartError::InvalidReference { index, len })
    }
}

impl Serialize for Cart {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<CartItem>::deserialize(deserializer)?;
        Self::from_items(items).map_err(serde::de::Error::custom)
    }
}
