//! Shopping cart state and mutations.
//!
//! [`CartStore`] is the only writer of cart state. Every mutation is
//! all-or-nothing: the next state is computed and validated, encoded, and
//! written to storage before it replaces the in-memory lines. A rejected
//! mutation or a failed write leaves both untouched.
//!
//! Count and total are always derived from the lines; nothing is tracked
//! separately.
//!
//! Product ids passed in are trimmed before lookup, matching how
//! [`ProductId`](vitrine_core::ProductId) normalizes catalog and stored ids.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut cart = CartStore::open(FileStore::new(".vitrine"), CartStore::DEFAULT_KEY);
//!
//! match cart.add_item(&catalog, "A") {
//!     Ok(change) => render(change),
//!     Err(e) => notify(&e.notice()),
//! }
//! ```

pub mod codec;

use thiserror::Error;
use tracing::{debug, info, instrument};
use vitrine_core::{CartLine, CartTotals};

use crate::catalog::ProductLookup;
use crate::storage::{KeyValueStore, StorageError};

/// Errors returned by cart mutations.
///
/// Every variant leaves the cart unchanged.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product is not in the current catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The product has no stock.
    #[error("Product out of stock: {0}")]
    OutOfStock(String),

    /// The requested quantity exceeds the line's stock snapshot.
    #[error("Stock limit reached for {id} (max {max_stock})")]
    StockLimitReached {
        /// Product id of the line.
        id: String,
        /// Stock snapshot bounding the line.
        max_stock: u32,
    },

    /// No cart line exists for the product.
    #[error("Cart line not found: {0}")]
    LineNotFound(String),

    /// The new state could not be persisted.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl CartError {
    /// User-facing message for this error.
    ///
    /// Storage details are not exposed.
    #[must_use]
    pub fn notice(&self) -> String {
        match self {
            Self::ProductNotFound(_) => "This product is no longer available".to_string(),
            Self::OutOfStock(_) => "Out of stock".to_string(),
            Self::StockLimitReached { max_stock, .. } => {
                format!("Insufficient stock (only {max_stock} available)")
            }
            Self::LineNotFound(_) => "This item is not in your cart".to_string(),
            Self::Storage(_) => "Your cart could not be saved, please try again".to_string(),
        }
    }
}

/// Outcome of a successful mutation, for the view to re-render from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// The cart has lines; here are the new totals.
    Updated(CartTotals),
    /// The cart has no lines left. Views showing the cart may close.
    Emptied,
}

impl CartChange {
    fn of(lines: &[CartLine]) -> Self {
        if lines.is_empty() {
            Self::Emptied
        } else {
            Self::Updated(CartTotals::of(lines))
        }
    }

    /// Totals after the mutation (zero when emptied).
    #[must_use]
    pub const fn totals(&self) -> CartTotals {
        match self {
            Self::Updated(totals) => *totals,
            Self::Emptied => CartTotals { count: 0, total: 0 },
        }
    }
}

/// Cart lines backed by a [`KeyValueStore`].
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    key: String,
    lines: Vec<CartLine>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Storage key used by default.
    pub const DEFAULT_KEY: &'static str = "cart";

    /// Open the cart persisted under `key`.
    ///
    /// Absent or corrupt data yields an empty cart.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let lines = codec::decode(storage.get(&key).as_deref());
        info!(key = %key, lines = lines.len(), "Cart opened");
        Self {
            storage,
            key,
            lines,
        }
    }

    /// Add one unit of a catalog product.
    ///
    /// Creates a line snapshotting name, price and stock, or increments the
    /// existing line for the same product.
    ///
    /// # Errors
    ///
    /// - [`CartError::ProductNotFound`] if the catalog has no such product
    /// - [`CartError::OutOfStock`] if its stock is 0
    /// - [`CartError::StockLimitReached`] if the line is already at its
    ///   stock snapshot
    /// - [`CartError::Storage`] if the new state could not be written
    #[instrument(skip(self, catalog))]
    pub fn add_item<C>(&mut self, catalog: &C, product_id: &str) -> Result<CartChange, CartError>
    where
        C: ProductLookup + ?Sized,
    {
        let product_id = product_id.trim();
        let product = catalog
            .product(product_id)
            .ok_or_else(|| CartError::ProductNotFound(product_id.to_string()))?;

        if product.is_out_of_stock() {
            return Err(CartError::OutOfStock(product_id.to_string()));
        }

        let mut next = self.lines.clone();
        match next.iter_mut().find(|line| line.id == product_id) {
            Some(line) if line.is_at_stock_limit() => {
                return Err(CartError::StockLimitReached {
                    id: product_id.to_string(),
                    max_stock: line.max_stock,
                });
            }
            Some(line) => line.quantity += 1,
            None => next.push(CartLine::from_product(&product)),
        }

        self.commit(next)
    }

    /// Adjust a line's quantity by `delta`.
    ///
    /// A result of zero or less removes the line.
    ///
    /// # Errors
    ///
    /// - [`CartError::LineNotFound`] if the cart has no line for the product
    /// - [`CartError::StockLimitReached`] if the result exceeds the line's
    ///   stock snapshot; the quantity is not clamped
    /// - [`CartError::Storage`] if the new state could not be written
    #[instrument(skip(self))]
    pub fn change_quantity(
        &mut self,
        product_id: &str,
        delta: i64,
    ) -> Result<CartChange, CartError> {
        let product_id = product_id.trim();
        let (current, max_stock) = self
            .line(product_id)
            .map(|line| (line.quantity, line.max_stock))
            .ok_or_else(|| CartError::LineNotFound(product_id.to_string()))?;

        let requested = i64::from(current).saturating_add(delta);
        if requested <= 0 {
            return self.remove_item(product_id);
        }

        let quantity = u32::try_from(requested)
            .ok()
            .filter(|q| *q <= max_stock)
            .ok_or_else(|| CartError::StockLimitReached {
                id: product_id.to_string(),
                max_stock,
            })?;

        let mut next = self.lines.clone();
        if let Some(line) = next.iter_mut().find(|line| line.id == product_id) {
            line.quantity = quantity;
        }

        self.commit(next)
    }

    /// Remove a product's line.
    ///
    /// Removing a product that is not in the cart succeeds without writing.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the new state could not be written.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, product_id: &str) -> Result<CartChange, CartError> {
        let product_id = product_id.trim();
        if self.line(product_id).is_none() {
            debug!("No line to remove");
            return Ok(CartChange::of(&self.lines));
        }

        let next = self
            .lines
            .iter()
            .filter(|line| line.id != product_id)
            .cloned()
            .collect();

        self.commit(next)
    }

    /// Remove every line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Storage`] if the empty cart could not be written.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> Result<CartChange, CartError> {
        self.commit(Vec::new())
    }

    /// Sum of line quantities.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.totals().count
    }

    /// Sum of `price * quantity` over all lines.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.totals().total
    }

    /// Count and total together.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals::of(&self.lines)
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// The line for a product, if any.
    #[must_use]
    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        let product_id = product_id.trim();
        self.lines.iter().find(|line| line.id == product_id)
    }

    /// Returns true if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Consume the store and return its storage backend.
    pub fn into_storage(self) -> S {
        self.storage
    }

    fn commit(&mut self, next: Vec<CartLine>) -> Result<CartChange, CartError> {
        let encoded = codec::encode(&next)?;
        self.storage.set(&self.key, &encoded)?;
        self.lines = next;

        let change = CartChange::of(&self.lines);
        let totals = change.totals();
        debug!(
            lines = self.lines.len(),
            count = totals.count,
            total = totals.total,
            "Cart saved"
        );
        Ok(change)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use vitrine_core::{Product, ProductId};

    use super::*;
    use crate::storage::MemoryStore;

    /// Store whose writes can be made to fail.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail: bool,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.fail {
                return Err(StorageError::Io(std::io::Error::other("disk full")));
            }
            self.inner.set(key, value)
        }
    }

    fn product(id: &str, price: u64, stock: u32) -> Product {
        Product {
            id: ProductId::parse(id).unwrap(),
            name: format!("Product {id}"),
            price,
            stock,
            category: String::new(),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![product("A", 100, 2), product("B", 30, 5), product("Z", 10, 0)]
    }

    fn empty_cart() -> CartStore<MemoryStore> {
        CartStore::open(MemoryStore::new(), CartStore::<MemoryStore>::DEFAULT_KEY)
    }

    fn assert_invariants<S: KeyValueStore>(cart: &CartStore<S>) {
        for line in cart.lines() {
            assert!(line.quantity >= 1 && line.quantity <= line.max_stock);
        }
        let count: u64 = cart.lines().iter().map(|l| u64::from(l.quantity)).sum();
        let total: u64 = cart.lines().iter().map(CartLine::line_total).sum();
        assert_eq!(cart.count(), count);
        assert_eq!(cart.total(), total);
    }

    #[test]
    fn test_add_creates_snapshot_line() {
        let mut cart = empty_cart();
        let change = cart.add_item(&catalog(), "B").unwrap();

        assert_eq!(change, CartChange::Updated(CartTotals { count: 1, total: 30 }));
        let line = cart.line("B").unwrap();
        assert_eq!(line.name, "Product B");
        assert_eq!(line.max_stock, 5);
        assert_invariants(&cart);
    }

    #[test]
    fn test_repeat_add_increments_single_line() {
        let mut cart = empty_cart();
        cart.add_item(&catalog(), "A").unwrap();
        cart.add_item(&catalog(), "A").unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.line("A").unwrap().quantity, 2);
        assert_eq!(cart.total(), 200);

        let err = cart.add_item(&catalog(), "A").unwrap_err();
        assert!(matches!(err, CartError::StockLimitReached { max_stock: 2, .. }));
        assert_eq!(cart.line("A").unwrap().quantity, 2);
        assert_invariants(&cart);
    }

    #[test]
    fn test_add_unknown_product() {
        let mut cart = empty_cart();
        let err = cart.add_item(&catalog(), "missing").unwrap_err();
        assert!(matches!(err, CartError::ProductNotFound(id) if id == "missing"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_out_of_stock() {
        let mut cart = empty_cart();
        let err = cart.add_item(&catalog(), "Z").unwrap_err();
        assert!(matches!(err, CartError::OutOfStock(_)));
        assert!(cart.is_empty());
        assert_eq!(cart.into_storage().get("cart"), None);
    }

    #[test]
    fn test_add_uses_line_snapshot_not_live_stock() {
        let mut cart = empty_cart();
        cart.add_item(&catalog(), "A").unwrap();

        // Catalog restocked after the line was created.
        let restocked = vec![product("A", 999, 10)];
        cart.add_item(&restocked, "A").unwrap();
        let err = cart.add_item(&restocked, "A").unwrap_err();

        assert!(matches!(err, CartError::StockLimitReached { .. }));
        assert_eq!(cart.line("A").unwrap().price, 100);
    }

    #[test]
    fn test_change_quantity_within_bounds() {
        let mut cart = empty_cart();
        cart.add_item(&catalog(), "B").unwrap();

        let change = cart.change_quantity("B", 3).unwrap();
        assert_eq!(change.totals(), CartTotals { count: 4, total: 120 });
        assert_invariants(&cart);
    }

    #[test]
    fn test_change_quantity_above_stock_is_rejected() {
        let mut cart = empty_cart();
        cart.add_item(&catalog(), "A").unwrap();
        cart.change_quantity("A", 1).unwrap();

        let err = cart.change_quantity("A", 1).unwrap_err();
        assert!(matches!(err, CartError::StockLimitReached { .. }));
        assert_eq!(cart.line("A").unwrap().quantity, 2);

        let err = cart.change_quantity("A", i64::MAX).unwrap_err();
        assert!(matches!(err, CartError::StockLimitReached { .. }));
    }

    #[test]
    fn test_change_quantity_to_zero_removes_line() {
        let mut cart = empty_cart();
        cart.add_item(&catalog(), "A").unwrap();
        cart.add_item(&catalog(), "B").unwrap();

        let change = cart.change_quantity("A", -1).unwrap();
        assert!(cart.line("A").is_none());
        assert_eq!(change, CartChange::Updated(CartTotals { count: 1, total: 30 }));

        let change = cart.change_quantity("B", i64::MIN).unwrap();
        assert_eq!(change, CartChange::Emptied);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_change_quantity_missing_line() {
        let mut cart = empty_cart();
        let err = cart.change_quantity("A", 1).unwrap_err();
        assert!(matches!(err, CartError::LineNotFound(_)));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut cart = empty_cart();
        cart.add_item(&catalog(), "B").unwrap();
        let before = cart.lines().to_vec();

        let change = cart.remove_item("X").unwrap();
        assert_eq!(change, CartChange::Updated(CartTotals { count: 1, total: 30 }));
        assert_eq!(cart.lines(), before.as_slice());
    }

    #[test]
    fn test_remove_last_line_signals_empty() {
        let mut cart = empty_cart();
        cart.add_item(&catalog(), "B").unwrap();
        assert_eq!(cart.remove_item("B").unwrap(), CartChange::Emptied);
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total(), 0);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut cart = empty_cart();
        cart.add_item(&catalog(), "B").unwrap();
        cart.add_item(&catalog(), "A").unwrap();
        cart.add_item(&catalog(), "B").unwrap();

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["B", "A"]);
    }

    #[test]
    fn test_clear() {
        let mut cart = empty_cart();
        cart.add_item(&catalog(), "A").unwrap();
        assert_eq!(cart.clear().unwrap(), CartChange::Emptied);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_mutations_persist_and_reopen() {
        let mut cart = empty_cart();
        cart.add_item(&catalog(), "A").unwrap();
        cart.add_item(&catalog(), "B").unwrap();
        cart.change_quantity("B", 2).unwrap();
        let lines = cart.lines().to_vec();

        let reopened = CartStore::open(cart.into_storage(), "cart");
        assert_eq!(reopened.lines(), lines.as_slice());
        assert_eq!(reopened.total(), 190);
    }

    #[test]
    fn test_open_corrupt_storage_is_empty() {
        let cart = CartStore::open(MemoryStore::with_entry("cart", "]]"), "cart");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_failed_write_leaves_state_unchanged() {
        let mut cart = CartStore::open(FlakyStore::default(), "cart");
        cart.add_item(&catalog(), "A").unwrap();

        cart.storage.fail = true;
        let err = cart.add_item(&catalog(), "A").unwrap_err();
        assert!(matches!(err, CartError::Storage(_)));
        assert_eq!(cart.line("A").unwrap().quantity, 1);

        let err = cart.remove_item("A").unwrap_err();
        assert!(matches!(err, CartError::Storage(_)));
        assert!(cart.line("A").is_some());

        cart.storage.fail = false;
        let stored = codec::decode(cart.storage.get("cart").as_deref());
        assert_eq!(stored, cart.lines());
    }

    #[test]
    fn test_padded_payload_id_resolves_everywhere() {
        let catalog = crate::catalog::products_from_payload(&serde_json::json!([
            {"id": " D ", "name": "Dock", "price": 40, "stock": 3}
        ]));
        let mut cart = empty_cart();

        cart.add_item(&catalog, " D ").unwrap();
        cart.add_item(&catalog, "D").unwrap();
        assert_eq!(cart.line(" D ").unwrap().quantity, 2);

        cart.change_quantity(" D ", 1).unwrap();
        assert_eq!(cart.line("D").unwrap().quantity, 3);

        cart.remove_item(" D ").unwrap();
        assert!(cart.is_empty());
        assert_invariants(&cart);
    }

    #[test]
    fn test_notice_messages() {
        let err = CartError::StockLimitReached {
            id: "A".to_string(),
            max_stock: 2,
        };
        assert_eq!(err.notice(), "Insufficient stock (only 2 available)");

        let err = CartError::Storage(StorageError::InvalidKey("x".to_string()));
        assert!(!err.notice().contains("x"));
    }
}
