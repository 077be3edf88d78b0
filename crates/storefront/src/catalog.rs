//! Product catalog shown on the home page.
//!
//! Loaded once at startup from a JSON array of `{title, price, image}`
//! entries. Each card's add-to-cart form posts those three values back.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use threadline_core::{PriceError, ProductRef};

/// One product card.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogProduct {
    pub title: String,
    /// Price as shown on the card, currency glyph included.
    pub price: String,
    pub image: String,
}

impl CatalogProduct {
    /// The add-to-cart payload for this card.
    ///
    /// # Errors
    ///
    /// Returns `PriceError` if the displayed price is not a valid amount.
    pub fn product_ref(&self) -> Result<ProductRef, PriceError> {
        ProductRef::from_display(&self.title, &self.price, &self.image)
    }
}

/// All products, in file order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Arc<Vec<CatalogProduct>>,
}

impl Catalog {
    /// Load the catalog from a JSON file.
    ///
    /// A missing file yields an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// lists a product with an empty title or unparseable price.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        if !path.exists() {
            tracing::warn!("Catalog file does not exist: {:?}", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let products: Vec<CatalogProduct> =
            serde_json::from_str(&content).map_err(|source| CatalogError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let catalog = Self::from_products(products)?;
        tracing::info!("Loaded {} catalog products", catalog.products.len());
        Ok(catalog)
    }

    /// Build a catalog from already parsed products.
    ///
    /// # Errors
    ///
    /// Returns an error if a product has an empty title or unparseable price.
    pub fn from_products(products: Vec<CatalogProduct>) -> Result<Self, CatalogError> {
        for product in &products {
            if product.title.trim().is_empty() {
                return Err(CatalogError::EmptyTitle);
            }
            product
                .product_ref()
                .map_err(|source| CatalogError::InvalidPrice {
                    title: product.title.clone(),
                    source,
                })?;
        }
        Ok(Self {
            products: Arc::new(products),
        })
    }

    /// Products in file order.
    #[must_use]
    pub fn products(&self) -> &[CatalogProduct] {
        &self.products
    }
}

/// Catalog loading errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("catalog product has an empty title")]
    EmptyTitle,
    #[error("catalog product {title:?} has an invalid price: {source}")]
    InvalidPrice {
        title: String,
        #[source]
        source: PriceError,
    },
}
