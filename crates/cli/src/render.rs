//! Plain-text rendering of catalog and cart views.

use std::fmt::Write;

use vitrine_core::{CartLine, CartTotals, Product, placeholder_image_url};
use vitrine_storefront::CartChange;

/// Format an amount with `,` thousands separators.
pub fn amount(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Render a product list, one card per line.
pub fn products(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products found".to_string();
    }

    let mut out = String::new();
    for product in products {
        let availability = if product.is_out_of_stock() {
            "out of stock".to_string()
        } else {
            format!("in stock: {}", product.stock)
        };
        let category = if product.is_uncategorized() {
            "uncategorized"
        } else {
            product.category.as_str()
        };
        let _ = writeln!(
            out,
            "{id}  {name}  {price}  [{category}]  {availability}  {image}",
            id = product.id,
            name = product.name,
            price = amount(product.price),
            image = placeholder_image_url(&product.category, &product.name),
        );
    }
    out.trim_end().to_string()
}

/// Render the category filter list, `all` first.
pub fn categories(categories: &[String]) -> String {
    std::iter::once(vitrine_storefront::ALL_CATEGORIES)
        .chain(categories.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render cart lines with a totals footer.
pub fn cart(lines: &[CartLine], totals: CartTotals) -> String {
    if lines.is_empty() {
        return "Your cart is empty".to_string();
    }

    let mut out = String::new();
    for line in lines {
        let _ = writeln!(
            out,
            "{id}  {name}  {price} x {quantity} = {line_total}  (max {max})",
            id = line.id,
            name = line.name,
            price = amount(line.price),
            quantity = line.quantity,
            line_total = amount(line.line_total()),
            max = line.max_stock,
        );
    }
    let _ = write!(out, "{}", summary(totals));
    out
}

/// Render the result of a cart mutation.
pub fn change(change: CartChange) -> String {
    match change {
        CartChange::Updated(totals) => summary(totals),
        CartChange::Emptied => "Your cart is empty".to_string(),
    }
}

fn summary(totals: CartTotals) -> String {
    format!("Items: {}  Total: {}", totals.count, amount(totals.total))
}
