//! Cart view renderer.
//!
//! Turns the store's current state into display rows. Nothing is cached: each
//! call re-reads the persisted cart, so a redraw after any mutation always
//! reflects what was written.

use std::fmt;

use threadline_core::{Cart, CartItem, LineRef, Price, Size};

use crate::storage::CartStorage;
use crate::store::CartStore;

/// One entry of a row's size selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeOption {
    pub label: &'static str,
    pub selected: bool,
}

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartRow {
    /// Position of the line when it was rendered; the row's controls post it back.
    pub index: usize,
    pub title: String,
    pub image_url: String,
    pub unit_price: String,
    pub line_total: String,
    pub quantity: u32,
    pub size: Size,
    /// All sizes, with the line's current size selected.
    pub size_options: Vec<SizeOption>,
}

impl CartRow {
    fn new(index: usize, item: &CartItem) -> Self {
        Self {
            index,
            title: item.title.clone(),
            image_url: item.image_url.clone(),
            unit_price: item.unit_price.display(),
            line_total: item.line_total().display(),
            quantity: item.quantity.get(),
            size: item.size,
            size_options: Size::ALL
                .into_iter()
                .map(|size| SizeOption {
                    label: size.as_str(),
                    selected: size == item.size,
                })
                .collect(),
        }
    }

    /// Reference used by this row's quantity, size and remove controls.
    #[must_use]
    pub fn line_ref(&self) -> LineRef {
        LineRef::at(self.index).expecting(self.title.clone())
    }
}

/// The rendered cart: rows in insertion order plus the total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub rows: Vec<CartRow>,
    pub total: Price,
    pub total_display: String,
    pub item_count: u64,
}

impl CartView {
    /// Render the store's current cart.
    pub fn render<S: CartStorage>(store: &CartStore<S>) -> Self {
        Self::from_cart(&store.cart())
    }

    /// Render an already loaded cart.
    #[must_use]
    pub fn from_cart(cart: &Cart) -> Self {
        let total = cart.total();
        Self {
            rows: cart
                .items()
                .iter()
                .enumerate()
                .map(|(index, item)| CartRow::new(index, item))
                .collect(),
            total,
            total_display: total.display(),
            item_count: cart.item_count(),
        }
    }

    /// A view with no rows and a zero total.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_cart(&Cart::new())
    }

    /// Whether there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for CartView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            writeln!(f, "Your cart is empty.")?;
            return write!(f, "Total: {}", self.total_display);
        }

        let title_width = self
            .rows
            .iter()
            .map(|row| row.title.chars().count())
            .max()
            .unwrap_or(0)
            .max("Item".len());

        writeln!(
            f,
            "{:>3}  {:<title_width$}  {:>10}  {:>5}  {:<4}  {:>12}",
            "#", "Item", "Price", "Qty", "Size", "Line total"
        )?;
        for row in &self.rows {
            writeln!(
                f,
                "{:>3}  {:<title_width$}  {:>10}  {:>5}  {:<4}  {:>12}",
                row.index, row.title, row.unit_price, row.quantity, row.size, row.line_total
            )?;
        }
        write!(f, "Total: {}", self.total_display)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use threadline_core::ProductRef;

    use super::*;
    use crate::storage::MemoryStorage;

    fn store_with(titles: &[&str]) -> CartStore<MemoryStorage> {
        let mut store = CartStore::new(MemoryStorage::new());
        for title in titles {
            let product = ProductRef::from_display(title, "₹250", "img.png").unwrap();
            store.add_item(&product).unwrap();
        }
        store
    }

    #[test]
    fn test_rows_follow_insertion_order() {
        let store = store_with(&["A", "B", "C"]);
        let view = CartView::render(&store);

        let titles: Vec<_> = view.rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
        let indexes: Vec<_> = view.rows.iter().map(|r| r.index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
    }

    #[test]
    fn test_row_contents() {
        let mut store = store_with(&["Tee"]);
        store.change_quantity(&LineRef::at(0), 2).unwrap();
        store.change_size(&LineRef::at(0), Size::TripleExtraLarge).unwrap();

        let view = CartView::render(&store);
        let row = &view.rows[0];
        assert_eq!(row.unit_price, "₹250");
        assert_eq!(row.line_total, "₹750");
        assert_eq!(row.quantity, 3);
        assert_eq!(row.image_url, "img.png");
        assert_eq!(row.size_options.len(), 7);

        let selected: Vec<_> = row
            .size_options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.label)
            .collect();
        assert_eq!(selected, vec!["3XL"]);
        assert_eq!(view.total_display, "₹750");
        assert_eq!(view.item_count, 3);
    }

    #[test]
    fn test_row_line_ref_checks_identity() {
        let store = store_with(&["A", "B"]);
        let view = CartView::render(&store);
        let line = view.rows[1].line_ref();
        assert_eq!(line.index(), 1);
        assert_eq!(line.expected_title(), Some("B"));
    }

    #[test]
    fn test_rerender_reflects_removal() {
        let mut store = store_with(&["A", "B", "C"]);
        let before = CartView::render(&store);
        store.remove_item(&before.rows[1].line_ref()).unwrap();

        let after = CartView::render(&store);
        let titles: Vec<_> = after.rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
        assert_eq!(after.rows[1].index, 1);
    }

    #[test]
    fn test_empty_view() {
        let view = CartView::empty();
        assert!(view.is_empty());
        assert_eq!(view.total, Price::ZERO);
        assert_eq!(view.to_string(), "Your cart is empty.\nTotal: ₹0");
    }

    #[test]
    fn test_text_table() {
        let store = store_with(&["Linen Shirt"]);
        let text = CartView::render(&store).to_string();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Item"));
        assert!(lines[1].contains("Linen Shirt"));
        assert!(lines[1].contains("₹250"));
        assert!(lines[1].contains(" M "));
        assert_eq!(lines[2], "Total: ₹250");
    }
}
