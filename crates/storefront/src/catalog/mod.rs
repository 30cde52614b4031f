//! Product catalog loading and lookup.
//!
//! # Architecture
//!
//! - [`CatalogSource`] fetches a raw JSON payload (HTTP in production,
//!   canned values in tests)
//! - [`CatalogStore`] normalizes the payload and holds the last applied list
//! - [`ProductLookup`] is the narrow capability the cart store needs
//!
//! # Reload ordering
//!
//! Every [`CatalogStore::load`] takes a ticket from a monotonic counter before
//! it awaits the source. On resume the parsed list is applied only if no
//! later-issued load has been applied yet, so overlapping reloads always
//! settle on the newest request rather than whichever response arrived last.
//!
//! # Example
//!
//! ```rust,ignore
//! let catalog = CatalogStore::new();
//! let source = HttpCatalogSource::new(config.catalog_url.clone(), config.fetch_timeout)?;
//!
//! catalog.load(&source).await?;
//! let audio = catalog.filter_by_category("audio");
//! ```

mod conversions;
mod http;

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use vitrine_core::Product;

pub use conversions::products_from_payload;
pub use http::HttpCatalogSource;

/// Category value that disables filtering.
pub const ALL_CATEGORIES: &str = "all";

/// Errors that can occur when loading the catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("Catalog endpoint returned HTTP {0}")]
    Status(u16),

    /// The payload was not valid JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Provider of raw catalog payloads.
///
/// Implementations return the decoded JSON document; shape validation and
/// normalization happen in [`CatalogStore::load`].
pub trait CatalogSource {
    /// Fetch the current catalog payload.
    fn fetch(&self) -> impl Future<Output = Result<Value, LoadError>> + Send;
}

/// Read access to products by id.
pub trait ProductLookup {
    /// Returns the product with the given id, if known.
    ///
    /// Surrounding whitespace in `id` is ignored.
    fn product(&self, id: &str) -> Option<Product>;
}

impl ProductLookup for [Product] {
    fn product(&self, id: &str) -> Option<Product> {
        let id = id.trim();
        self.iter().find(|p| p.id == id).cloned()
    }
}

impl ProductLookup for Vec<Product> {
    fn product(&self, id: &str) -> Option<Product> {
        self.as_slice().product(id)
    }
}

#[derive(Debug, Default)]
struct Held {
    products: Vec<Product>,
    /// Ticket of the load that produced `products` (0 = never loaded).
    applied: u64,
}

/// Holds the last applied product list.
///
/// Safe to share by reference between concurrently polled loads; the list is
/// replaced wholesale and never merged.
#[derive(Debug, Default)]
pub struct CatalogStore {
    held: RwLock<Held>,
    tickets: AtomicU64,
}

impl CatalogStore {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog pre-populated with `products`.
    #[must_use]
    pub fn with_products(products: Vec<Product>) -> Self {
        let store = Self::new();
        let ticket = store.next_ticket();
        store.apply(ticket, products);
        store
    }

    /// Fetch, normalize and apply a catalog payload.
    ///
    /// Accepts `{ "products": [...] }` or a bare array; any other shape
    /// yields an empty list. Returns the list parsed by this call even when
    /// a newer load has already superseded it.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the source fails. The held list is left
    /// untouched so callers can keep showing the stale catalog.
    #[instrument(skip_all)]
    pub async fn load<S>(&self, source: &S) -> Result<Vec<Product>, LoadError>
    where
        S: CatalogSource + Sync,
    {
        let ticket = self.next_ticket();
        debug!(ticket, "Catalog load started");

        let payload = match source.fetch().await {
            Ok(payload) => payload,
            Err(e) => {
                warn!(ticket, error = %e, "Catalog load failed, keeping previous list");
                return Err(e);
            }
        };

        let products = products_from_payload(&payload);
        self.apply(ticket, products.clone());
        Ok(products)
    }

    /// Returns the last applied list, or empty if nothing was loaded.
    #[must_use]
    pub fn get_all(&self) -> Vec<Product> {
        self.read().products.clone()
    }

    /// Returns products in the given category, preserving catalog order.
    ///
    /// [`ALL_CATEGORIES`] returns the full list. Unknown categories yield an
    /// empty list.
    #[must_use]
    pub fn filter_by_category(&self, category: &str) -> Vec<Product> {
        let held = self.read();
        if category == ALL_CATEGORIES {
            return held.products.clone();
        }
        held.products
            .iter()
            .filter(|p| p.category == category)
            .cloned()
            .collect()
    }

    /// Returns the distinct non-empty categories in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        let held = self.read();
        let mut seen: Vec<String> = Vec::new();
        for product in &held.products {
            if !product.is_uncategorized() && !seen.contains(&product.category) {
                seen.push(product.category.clone());
            }
        }
        seen
    }

    /// Returns the product with the given id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<Product> {
        self.read().products.product(id)
    }

    /// Number of products currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().products.len()
    }

    /// Returns true if no products are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().products.is_empty()
    }

    fn next_ticket(&self) -> u64 {
        self.tickets.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn apply(&self, ticket: u64, products: Vec<Product>) {
        let mut held = self.write();
        if ticket < held.applied {
            debug!(
                ticket,
                applied = held.applied,
                "Discarding stale catalog response"
            );
            return;
        }
        info!(ticket, count = products.len(), "Catalog applied");
        held.products = products;
        held.applied = ticket;
    }

    fn read(&self) -> RwLockReadGuard<'_, Held> {
        self.held.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Held> {
        self.held.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ProductLookup for CatalogStore {
    fn product(&self, id: &str) -> Option<Product> {
        self.get(id)
    }
}
