//! Catalog payload conversion functions.
//!
//! Turns the provider's loosely-typed JSON into normalized [`Product`]s.
//! Missing fields take their documented defaults; malformed numbers follow
//! the policy in [`crate::lenient`] and are logged.

use serde_json::{Map, Value};
use tracing::warn;
use vitrine_core::{Product, ProductId};

use crate::lenient::{LenientInt, lenient_id, lenient_name};

/// Extract the product list from a catalog payload.
///
/// Accepts `{ "products": [...] }` or a bare array. Any other shape yields an
/// empty list. Entries that are not objects or carry no usable id are skipped.
#[must_use]
pub fn products_from_payload(payload: &Value) -> Vec<Product> {
    let entries: &[Value] = match payload {
        Value::Array(items) => items.as_slice(),
        Value::Object(map) => match map.get("products") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => {
                warn!("Catalog payload has no products array, treating as empty");
                &[]
            }
        },
        _ => {
            warn!("Catalog payload is neither an object nor an array, treating as empty");
            &[]
        }
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let product = product_from_value(entry);
            if product.is_none() {
                warn!(index, "Skipping catalog entry without a usable id");
            }
            product
        })
        .collect()
}

fn product_from_value(value: &Value) -> Option<Product> {
    let fields = value.as_object()?;
    let id = lenient_id(fields.get("id")?)?;

    let name = lenient_name(fields.get("name"));

    let category = match fields.get("category") {
        Some(Value::String(s)) => s.clone(),
        _ => String::new(),
    };

    let price = count_field(fields, "price", &id).or_zero();
    let stock = count_field(fields, "stock", &id).or_zero_u32();

    Some(Product {
        id,
        name,
        price,
        stock,
        category,
    })
}

fn count_field(fields: &Map<String, Value>, field: &str, id: &ProductId) -> LenientInt {
    let value = LenientInt::read(fields.get(field));
    if value.is_malformed() {
        let raw = fields.get(field).map(ToString::to_string).unwrap_or_default();
        warn!(
            product_id = %id,
            field,
            raw = %raw,
            "Malformed catalog number, defaulting to 0"
        );
    }
    value
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_bare_array() {
        let products = products_from_payload(&json!([
            {"id": "A", "name": "Phone", "price": 100, "stock": 2, "category": "smartphones"}
        ]));
        assert_eq!(products.len(), 1);
        let p = &products[0];
        assert_eq!(p.id, "A");
        assert_eq!(p.name, "Phone");
        assert_eq!(p.price, 100);
        assert_eq!(p.stock, 2);
        assert_eq!(p.category, "smartphones");
    }

    #[test]
    fn test_wrapped_payload() {
        let products = products_from_payload(&json!({"products": [{"id": 7}], "total": 1}));
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "7");
    }

    #[test]
    fn test_other_shapes_are_empty() {
        assert!(products_from_payload(&json!({"products": "nope"})).is_empty());
        assert!(products_from_payload(&json!({"data": []})).is_empty());
        assert!(products_from_payload(&json!("catalog")).is_empty());
        assert!(products_from_payload(&Value::Null).is_empty());
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let products = products_from_payload(&json!([{"id": "A"}]));
        let p = &products[0];
        assert_eq!(p.name, Product::UNTITLED);
        assert_eq!(p.price, 0);
        assert_eq!(p.stock, 0);
        assert!(p.is_uncategorized());
    }

    #[test]
    fn test_blank_name_uses_placeholder() {
        let products = products_from_payload(&json!([{"id": "A", "name": "  "}]));
        assert_eq!(products[0].name, Product::UNTITLED);
    }

    #[test]
    fn test_string_numbers_parse_leniently() {
        let products =
            products_from_payload(&json!([{"id": "A", "price": "1 990", "stock": "5 pcs"}]));
        assert_eq!(products[0].price, 1);
        assert_eq!(products[0].stock, 5);
    }

    #[test]
    fn test_malformed_numbers_default_to_zero() {
        let products = products_from_payload(&json!([
            {"id": "A", "price": "free", "stock": -4},
            {"id": "B", "price": {"amount": 3}, "stock": true}
        ]));
        assert!(products.iter().all(|p| p.price == 0 && p.stock == 0));
    }

    #[test]
    fn test_entries_without_id_are_skipped() {
        let products = products_from_payload(&json!([
            {"name": "ghost"},
            {"id": "", "name": "blank"},
            {"id": null},
            "not an object",
            {"id": "kept"}
        ]));
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "kept");
    }

    #[test]
    fn test_malformed_field_is_logged_without_failing() {
        let products = products_from_payload(&json!([{"id": "A", "price": [1, 2], "stock": 3}]));
        assert_eq!(products[0].price, 0);
        assert_eq!(products[0].stock, 3);
    }

    #[test]
    fn test_numeric_name_becomes_text() {
        let products = products_from_payload(&json!([{"id": "A", "name": 5000}]));
        assert_eq!(products[0].name, "5000");
    }

    #[test]
    fn test_non_string_category_is_uncategorized() {
        let products = products_from_payload(&json!([{"id": "A", "category": 3}]));
        assert!(products[0].is_uncategorized());
    }
}
