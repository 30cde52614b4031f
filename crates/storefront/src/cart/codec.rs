//! Cart persistence codec.
//!
//! Cart state is stored as a JSON array of
//! `{ "id", "name", "price", "quantity", "maxStock" }` objects. Decoding
//! never fails: absent or unparsable input yields an empty cart, and
//! individual entries are repaired so the decoded lines satisfy
//! `1 <= quantity <= max_stock` with unique ids:
//!
//! - duplicate ids fold into the first occurrence, capped at its `max_stock`
//! - quantities above `max_stock` are capped
//! - entries with no usable id, a zero quantity or a zero `max_stock` are
//!   dropped

use serde_json::Value;
use tracing::{debug, warn};
use vitrine_core::CartLine;

use crate::lenient::{LenientInt, lenient_id, lenient_name};
use crate::storage::StorageError;

/// Serialize cart lines to their stored form.
///
/// # Errors
///
/// Returns [`StorageError::Encode`] if serialization fails.
pub fn encode(lines: &[CartLine]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(lines)?)
}

/// Deserialize stored cart lines, repairing what can be repaired.
#[must_use]
pub fn decode(raw: Option<&str>) -> Vec<CartLine> {
    let Some(raw) = raw else {
        debug!("No stored cart, starting empty");
        return Vec::new();
    };

    let entries = match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(entries)) => entries,
        Ok(_) => {
            warn!("Stored cart is not an array, starting empty");
            return Vec::new();
        }
        Err(e) => {
            warn!(error = %e, "Stored cart is not valid JSON, starting empty");
            return Vec::new();
        }
    };

    let mut repairs = Repairs::default();
    let mut lines: Vec<CartLine> = Vec::with_capacity(entries.len());

    for entry in &entries {
        let Some(mut line) = line_from_value(entry) else {
            repairs.dropped += 1;
            continue;
        };

        if line.quantity == 0 || line.max_stock == 0 {
            repairs.dropped += 1;
            continue;
        }

        if let Some(existing) = lines.iter_mut().find(|l| l.id == line.id) {
            existing.quantity = existing
                .quantity
                .saturating_add(line.quantity)
                .min(existing.max_stock);
            repairs.merged += 1;
            continue;
        }

        if line.quantity > line.max_stock {
            line.quantity = line.max_stock;
            repairs.capped += 1;
        }
        lines.push(line);
    }

    if repairs.any() {
        warn!(
            dropped = repairs.dropped,
            merged = repairs.merged,
            capped = repairs.capped,
            kept = lines.len(),
            "Repaired stored cart"
        );
    }

    lines
}

#[derive(Debug, Default)]
struct Repairs {
    dropped: usize,
    merged: usize,
    capped: usize,
}

impl Repairs {
    const fn any(&self) -> bool {
        self.dropped + self.merged + self.capped > 0
    }
}

fn line_from_value(value: &Value) -> Option<CartLine> {
    let fields = value.as_object()?;
    let id = lenient_id(fields.get("id")?)?;

    let name = lenient_name(fields.get("name"));

    Some(CartLine {
        id,
        name,
        price: LenientInt::read(fields.get("price")).or_zero(),
        quantity: LenientInt::read(fields.get("quantity")).or_zero_u32(),
        max_stock: LenientInt::read(fields.get("maxStock")).or_zero_u32(),
    })
}
