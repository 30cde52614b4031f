//! Catalog browsing commands.

use serde_json::json;
use tracing::info;
use vitrine_storefront::error::add_breadcrumb;
use vitrine_storefront::{AppError, AppState};

use crate::render;

/// List products in a category (`all` for every product).
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub async fn list(state: &AppState, category: &str, json: bool) -> Result<String, AppError> {
    state.refresh_catalog().await?;
    add_breadcrumb("catalog", "Filtered products", Some(&[("category", category)]));

    let products = state.catalog().filter_by_category(category);
    info!(category, count = products.len(), "Listed products");

    if json {
        return Ok(json!(products).to_string());
    }
    Ok(render::products(&products))
}

/// List the categories present in the catalog.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded.
pub async fn categories(state: &AppState, json: bool) -> Result<String, AppError> {
    state.refresh_catalog().await?;
    let categories = state.catalog().categories();

    if json {
        return Ok(json!(categories).to_string());
    }
    Ok(render::categories(&categories))
}
