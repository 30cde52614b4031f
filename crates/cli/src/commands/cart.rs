//! Cart commands.

use serde_json::json;
use tracing::info;
use vitrine_core::ProductId;
use vitrine_storefront::error::add_breadcrumb;
use vitrine_storefront::{AppError, AppState, CartChange, CatalogSource, KeyValueStore};

use crate::render;

/// Show the cart lines and totals.
///
/// # Errors
///
/// Infallible today; kept fallible to match the other handlers.
#[allow(clippy::unnecessary_wraps)]
pub fn show<Src, Kv>(state: &AppState<Src, Kv>, json: bool) -> Result<String, AppError>
where
    Src: CatalogSource + Sync,
    Kv: KeyValueStore,
{
    let cart = state.cart();
    if json {
        return Ok(json!({
            "lines": cart.lines(),
            "totals": cart.totals(),
        })
        .to_string());
    }
    Ok(render::cart(cart.lines(), cart.totals()))
}

/// Add one unit of a product, checked against a freshly loaded catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or the cart rejects the
/// addition.
pub async fn add<Src, Kv>(
    state: &mut AppState<Src, Kv>,
    product_id: &ProductId,
    json: bool,
) -> Result<String, AppError>
where
    Src: CatalogSource + Sync,
    Kv: KeyValueStore,
{
    state.refresh_catalog().await?;
    let change = state.add_to_cart(product_id.as_str())?;
    add_breadcrumb("cart", "Added item", Some(&[("product_id", product_id.as_str())]));
    info!(product_id = %product_id, count = change.totals().count, "Added to cart");
    Ok(output(state, change, json))
}

/// Change a line's quantity by `delta`.
///
/// # Errors
///
/// Returns an error if the line is missing, the stock limit is exceeded or
/// the cart cannot be saved.
pub fn change<Src, Kv>(
    state: &mut AppState<Src, Kv>,
    product_id: &ProductId,
    delta: i64,
    json: bool,
) -> Result<String, AppError>
where
    Src: CatalogSource + Sync,
    Kv: KeyValueStore,
{
    let change = state.cart_mut().change_quantity(product_id.as_str(), delta)?;
    let delta_text = delta.to_string();
    add_breadcrumb(
        "cart",
        "Changed quantity",
        Some(&[("product_id", product_id.as_str()), ("delta", delta_text.as_str())]),
    );
    Ok(output(state, change, json))
}

/// Remove a product's line.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn remove<Src, Kv>(
    state: &mut AppState<Src, Kv>,
    product_id: &ProductId,
    json: bool,
) -> Result<String, AppError>
where
    Src: CatalogSource + Sync,
    Kv: KeyValueStore,
{
    let change = state.cart_mut().remove_item(product_id.as_str())?;
    add_breadcrumb("cart", "Removed item", Some(&[("product_id", product_id.as_str())]));
    Ok(output(state, change, json))
}

/// Remove every line.
///
/// # Errors
///
/// Returns an error if the cart cannot be saved.
pub fn clear<Src, Kv>(state: &mut AppState<Src, Kv>, json: bool) -> Result<String, AppError>
where
    Src: CatalogSource + Sync,
    Kv: KeyValueStore,
{
    let change = state.cart_mut().clear()?;
    add_breadcrumb("cart", "Cleared cart", None);
    Ok(output(state, change, json))
}

fn output<Src, Kv>(state: &AppState<Src, Kv>, change: CartChange, json: bool) -> String
where
    Src: CatalogSource + Sync,
    Kv: KeyValueStore,
{
    if json {
        return json!({
            "emptied": matches!(change, CartChange::Emptied),
            "lines": state.cart().lines(),
            "totals": change.totals(),
        })
        .to_string();
    }
    render::change(change)
}
