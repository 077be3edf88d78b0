//! Cart commands over a file-backed store.
//!
//! # Usage
//!
//! ```bash
//! threadline cart add --title "Tee" --price "₹499" --image tee.png
//! threadline cart inc 0 --title "Tee"
//! threadline cart size 0 XL
//! threadline cart show
//! threadline cart purchase
//! ```
//!
//! The cart lives in `<store-dir>/cart.json`. The directory comes from
//! `--store-dir`, then `THREADLINE_CART_DIR`, then `.threadline`.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use thiserror::Error;

use threadline_cart::{
    CartCommand, CartStore, DispatchOutcome, Dispatcher, FileStorage, Navigation, StorageError,
};
use threadline_core::{LineRef, PriceError, ProductRef, Size};

/// Errors that can occur while running a cart command.
#[derive(Debug, Error)]
pub enum CartCliError {
    #[error("cannot open cart store: {0}")]
    Storage(#[from] StorageError),

    #[error("invalid price: {0}")]
    Price(#[from] PriceError),
}

/// `threadline cart` arguments.
#[derive(Debug, Args)]
pub struct CartArgs {
    /// Directory holding the cart file
    #[arg(long, env = "THREADLINE_CART_DIR", default_value = ".threadline")]
    pub store_dir: PathBuf,

    #[command(subcommand)]
    pub action: CartAction,
}

/// A cart interaction.
#[derive(Debug, Subcommand)]
pub enum CartAction {
    /// Print the cart
    Show,
    /// Add a product, or bump its quantity if already in the cart
    Add {
        /// Product title
        #[arg(long)]
        title: String,
        /// Price as displayed, e.g. "₹499"
        #[arg(long)]
        price: String,
        /// Product image URL
        #[arg(long)]
        image: String,
    },
    /// Increase a line's quantity by one
    Inc(LineArgs),
    /// Decrease a line's quantity by one (never below one)
    Dec(LineArgs),
    /// Change a line's size
    Size {
        /// Line position, as printed by `show`
        index: usize,
        /// New size (S, M, L, XL, XXL, 3XL, 4XL)
        size: Size,
        /// Only act if the line still has this title
        #[arg(long)]
        title: Option<String>,
    },
    /// Remove a line
    Remove(LineArgs),
    /// Open the cart (refused when empty)
    Open,
    /// Purchase everything and empty the cart
    Purchase,
}

/// Line address shared by the per-line commands.
#[derive(Debug, Args)]
pub struct LineArgs {
    /// Line position, as printed by `show`
    pub index: usize,
    /// Only act if the line still has this title
    #[arg(long)]
    pub title: Option<String>,
}

impl LineArgs {
    fn line_ref(&self) -> LineRef {
        line_ref(self.index, self.title.as_deref())
    }
}

fn line_ref(index: usize, title: Option<&str>) -> LineRef {
    let line = LineRef::at(index);
    match title {
        Some(title) => line.expecting(title),
        None => line,
    }
}

impl CartAction {
    /// The dispatcher command for this action.
    fn command(&self) -> Result<CartCommand, CartCliError> {
        Ok(match self {
            Self::Show => CartCommand::Refresh,
            Self::Add {
                title,
                price,
                image,
            } => CartCommand::Add(Some(ProductRef::from_display(title, price, image)?)),
            Self::Inc(line) => CartCommand::Increment(line.line_ref()),
            Self::Dec(line) => CartCommand::Decrement(line.line_ref()),
            Self::Size { index, size, title } => {
                CartCommand::ChangeSize(line_ref(*index, title.as_deref()), *size)
            }
            Self::Remove(line) => CartCommand::Remove(line.line_ref()),
            Self::Open => CartCommand::OpenCart,
            Self::Purchase => CartCommand::Purchase,
        })
    }
}

/// Run one cart action against the store directory and return the report.
///
/// # Errors
///
/// Returns an error if the store directory cannot be created or the price
/// given to `add` is not a valid amount. Rejected cart changes are not
/// errors; they show up as a notice in the report.
pub fn execute(args: &CartArgs) -> Result<String, CartCliError> {
    let command = args.action.command()?;
    let storage = FileStorage::open(&args.store_dir)?;
    let mut dispatcher = Dispatcher::new(CartStore::new(storage));

    tracing::debug!(store_dir = %args.store_dir.display(), ?command, "Running cart command");
    Ok(report(&dispatcher.dispatch(command)))
}

/// Text shown after a command.
fn report(outcome: &DispatchOutcome) -> String {
    let mut lines = Vec::new();
    if let Some(notice) = outcome.notice {
        lines.push(notice.to_string());
    }
    match &outcome.navigation {
        Navigation::Blocked => return lines.join("\n"),
        Navigation::Redirect(target) => {
            lines.push(format!("Purchase complete. Confirmation: {target}"));
        }
        Navigation::Stay => {}
    }
    lines.push(outcome.view.to_string());
    lines.join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        cart: CartArgs,
    }

    fn run(dir: &std::path::Path, argv: &[&str]) -> String {
        let mut full = vec!["threadline", "--store-dir", dir.to_str().unwrap()];
        full.extend_from_slice(argv);
        let cli = TestCli::try_parse_from(full).unwrap();
        execute(&cli.cart).unwrap()
    }

    #[test]
    fn test_add_then_show() {
        let dir = tempfile::tempdir().unwrap();
        let out = run(
            dir.path(),
            &["add", "--title", "Tee", "--price", "₹499", "--image", "tee.png"],
        );
        assert!(out.starts_with("Item added to cart!"));

        run(
            dir.path(),
            &["add", "--title", "Tee", "--price", "₹499", "--image", "tee.png"],
        );
        let out = run(dir.path(), &["show"]);
        assert!(out.contains("Tee"));
        assert!(out.ends_with("Total: ₹998"));
    }

    #[test]
    fn test_open_empty_cart_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(run(dir.path(), &["open"]), "Your cart is empty!");
    }

    #[test]
    fn test_size_and_quantity() {
        let dir = tempfile::tempdir().unwrap();
        run(
            dir.path(),
            &["add", "--title", "Tee", "--price", "499", "--image", "tee.png"],
        );
        run(dir.path(), &["size", "0", "xl", "--title", "Tee"]);
        run(dir.path(), &["inc", "0"]);
        let out = run(dir.path(), &["show"]);
        assert!(out.contains(" XL "));
        assert!(out.ends_with("Total: ₹998"));

        run(dir.path(), &["dec", "0"]);
        run(dir.path(), &["dec", "0"]);
        assert!(run(dir.path(), &["show"]).ends_with("Total: ₹499"));
    }

    #[test]
    fn test_wrong_title_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        run(
            dir.path(),
            &["add", "--title", "Tee", "--price", "499", "--image", "tee.png"],
        );
        let out = run(dir.path(), &["remove", "0", "--title", "Hoodie"]);
        assert!(out.starts_with("Your cart changed, please try again."));
        assert!(out.contains("Tee"));
    }

    #[test]
    fn test_purchase_empties_cart() {
        let dir = tempfile::tempdir().unwrap();
        run(
            dir.path(),
            &["add", "--title", "Tee", "--price", "499", "--image", "tee.png"],
        );
        let out = run(dir.path(), &["purchase"]);
        assert!(out.contains("Confirmation: /checkout/complete"));
        assert_eq!(run(dir.path(), &["show"]), "Your cart is empty.\nTotal: ₹0");
        assert!(!dir.path().join("cart.json").exists());
    }

    #[test]
    fn test_purchase_report_layout() {
        let dir = tempfile::tempdir().unwrap();
        run(
            dir.path(),
            &["add", "--title", "Tee", "--price", "499", "--image", "tee.png"],
        );
        let out = run(dir.path(), &["purchase"]);
        let lines: Vec<&str> = out.lines().collect();

        let confirmation = lines
            .iter()
            .position(|line| *line == "Purchase complete. Confirmation: /checkout/complete")
            .unwrap();
        assert_eq!(&lines[confirmation + 1..], ["Your cart is empty.", "Total: ₹0"]);
        assert!(lines.iter().all(|line| !line.is_empty()));
    }

    #[test]
    fn test_bad_price_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = TestCli::try_parse_from([
            "threadline",
            "--store-dir",
            dir.path().to_str().unwrap(),
            "add",
            "--title",
            "Tee",
            "--price",
            "free",
            "--image",
            "tee.png",
        ])
        .unwrap();
        assert!(matches!(execute(&cli.cart), Err(CartCliError::Price(_))));
    }

    #[test]
    fn test_unknown_size_rejected_by_parser() {
        assert!(TestCli::try_parse_from(["threadline", "size", "0", "5XL"]).is_err());
    }
}
