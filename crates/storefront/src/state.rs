//! Application state owned by the view layer.
//!
//! Built once at startup and passed by reference to command handlers. The
//! catalog and the cart are owned here instead of living in globals.

use tracing::info;
use vitrine_core::Product;

use crate::cart::{CartChange, CartError, CartStore};
use crate::catalog::{CatalogSource, CatalogStore, HttpCatalogSource, LoadError};
use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::storage::{FileStore, KeyValueStore};

/// Catalog, catalog provider and cart, wired together.
#[derive(Debug)]
pub struct AppState<Src = HttpCatalogSource, Kv = FileStore> {
    catalog: CatalogStore,
    source: Src,
    cart: CartStore<Kv>,
}

impl AppState {
    /// Create the production state from configuration.
    ///
    /// Opens the persisted cart; the catalog starts empty until
    /// [`refresh_catalog`](Self::refresh_catalog) is awaited.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &StorefrontConfig) -> Result<Self, AppError> {
        let source = HttpCatalogSource::new(config.catalog_url.clone(), config.fetch_timeout)?;
        let storage = FileStore::new(&config.data_dir);
        info!(
            catalog_url = %config.catalog_url,
            data_dir = %config.data_dir.display(),
            "Storefront state initialized"
        );
        Ok(Self::with_parts(source, storage, &config.cart_key))
    }
}

impl<Src, Kv> AppState<Src, Kv>
where
    Src: CatalogSource + Sync,
    Kv: KeyValueStore,
{
    /// Assemble state from an arbitrary provider and storage backend.
    pub fn with_parts(source: Src, storage: Kv, cart_key: &str) -> Self {
        Self {
            catalog: CatalogStore::new(),
            source,
            cart: CartStore::open(storage, cart_key),
        }
    }

    /// Reload the catalog from the provider.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the provider fails; the previous catalog is
    /// kept.
    pub async fn refresh_catalog(&self) -> Result<Vec<Product>, LoadError> {
        self.catalog.load(&self.source).await
    }

    /// Add one unit of a product, validated against the current catalog.
    ///
    /// # Errors
    ///
    /// See [`CartStore::add_item`].
    pub fn add_to_cart(&mut self, product_id: &str) -> Result<CartChange, CartError> {
        self.cart.add_item(&self.catalog, product_id)
    }

    /// Get a reference to the catalog.
    #[must_use]
    pub const fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    /// Get a reference to the cart.
    #[must_use]
    pub const fn cart(&self) -> &CartStore<Kv> {
        &self.cart
    }

    /// Get a mutable reference to the cart.
    pub fn cart_mut(&mut self) -> &mut CartStore<Kv> {
        &mut self.cart
    }
}
