//! Cart state written to disk and read back by a fresh process.

use vitrine_core::{Product, ProductId};
use vitrine_storefront::{CartStore, CatalogStore, FileStore, KeyValueStore};

fn product(id: &str, price: u64, stock: u32) -> Product {
    Product {
        id: ProductId::parse(id).expect("valid id"),
        name: format!("Product {id}"),
        price,
        stock,
        category: "audio".to_string(),
    }
}

#[test]
fn test_cart_survives_restart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = CatalogStore::with_products(vec![product("A", 100, 2), product("B", 40, 5)]);

    let mut cart = CartStore::open(FileStore::new(dir.path()), "cart");
    cart.add_item(&catalog, "A").expect("add A");
    cart.add_item(&catalog, "B").expect("add B");
    cart.change_quantity("B", 2).expect("increase B");
    drop(cart);

    assert!(dir.path().join("cart.json").exists());

    let reopened = CartStore::open(FileStore::new(dir.path()), "cart");
    assert_eq!(reopened.count(), 4);
    assert_eq!(reopened.total(), 100 + 40 * 3);
    assert_eq!(reopened.line("B").expect("B kept").max_stock, 5);
}

#[test]
fn test_corrupt_file_opens_empty_and_is_overwritten() {
    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("cart.json"), "{not json").expect("write corrupt file");
    let catalog = CatalogStore::with_products(vec![product("A", 100, 2)]);

    let mut cart = CartStore::open(FileStore::new(dir.path()), "cart");
    assert!(cart.is_empty());

    cart.add_item(&catalog, "A").expect("add after corruption");
    let raw = FileStore::new(dir.path()).get("cart").expect("cart written");
    let stored: serde_json::Value = serde_json::from_str(&raw).expect("valid json");
    assert_eq!(stored[0]["id"], "A");
    assert_eq!(stored[0]["quantity"], 1);
}

#[test]
fn test_stored_cart_is_repaired_on_open() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = FileStore::new(dir.path());
    store
        .set(
            "cart",
            r#"[
                {"id": "A", "name": "Phone", "price": 100, "quantity": 9, "maxStock": 3},
                {"id": "A", "name": "Phone", "price": 100, "quantity": 1, "maxStock": 3},
                {"id": "B", "name": "Gone", "price": 5, "quantity": 0, "maxStock": 3}
            ]"#,
        )
        .expect("seed file");

    let cart = CartStore::open(store, "cart");
    assert_eq!(cart.lines().len(), 1);
    assert_eq!(cart.line("A").expect("A kept").quantity, 3);
    assert_eq!(cart.total(), 300);
}

#[test]
fn test_separate_keys_are_independent() {
    let dir = tempfile::tempdir().expect("tempdir");
    let catalog = CatalogStore::with_products(vec![product("A", 100, 2)]);

    let mut first = CartStore::open(FileStore::new(dir.path()), "cart");
    first.add_item(&catalog, "A").expect("add");

    let second = CartStore::open(FileStore::new(dir.path()), "guest-cart");
    assert!(second.is_empty());
    assert_eq!(first.count(), 1);
}
