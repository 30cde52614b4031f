//! Catalog product type.

use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A purchasable product as held by the catalog.
///
/// Values are normalized at load time: `name` is never blank, `category` is
/// empty for uncategorized products, and malformed `price`/`stock` values have
/// already been coerced to 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Opaque unique identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in the display currency unit.
    pub price: u64,
    /// Units available.
    pub stock: u32,
    /// Category tag used for filtering (empty when uncategorized).
    pub category: String,
}

impl Product {
    /// Name used when the catalog entry has none.
    pub const UNTITLED: &'static str = "Untitled";

    /// Returns true when no units are available.
    #[must_use]
    pub const fn is_out_of_stock(&self) -> bool {
        self.stock == 0
    }

    /// Returns true when the product has no category tag.
    #[must_use]
    pub fn is_uncategorized(&self) -> bool {
        self.category.is_empty()
    }
}
