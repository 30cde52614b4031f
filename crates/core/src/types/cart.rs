//! Cart line and totals types.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::product::Product;

/// One product's entry in the cart.
///
/// `name` and `price` are snapshots taken when the line was created and do
/// not follow later catalog changes. `max_stock` is the stock snapshot that
/// bounds later quantity edits.
///
/// Invariant (maintained by the cart store): `1 <= quantity <= max_stock`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    /// Referenced product.
    pub id: ProductId,
    /// Product name at add time.
    pub name: String,
    /// Unit price at add time.
    pub price: u64,
    /// Units requested.
    pub quantity: u32,
    /// Stock at add time.
    pub max_stock: u32,
}

impl CartLine {
    /// Create a single-unit line snapshotting the product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            quantity: 1,
            max_stock: product.stock,
        }
    }

    /// `price * quantity`, saturating at `u64::MAX`.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }

    /// Returns true when another unit would exceed the stock snapshot.
    #[must_use]
    pub const fn is_at_stock_limit(&self) -> bool {
        self.quantity >= self.max_stock
    }
}

/// Derived cart figures.
///
/// Always computed from the lines, never tracked independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartTotals {
    /// Sum of line quantities.
    pub count: u64,
    /// Sum of line totals.
    pub total: u64,
}

impl CartTotals {
    /// Compute totals over a sequence of lines.
    #[must_use]
    pub fn of(lines: &[CartLine]) -> Self {
        lines.iter().fold(Self::default(), |acc, line| Self {
            count: acc.count + u64::from(line.quantity),
            total: acc.total.saturating_add(line.line_total()),
        })
    }
}
