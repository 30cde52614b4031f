//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type for view-layer entry points. Errors are
//! captured to Sentry before being turned into a user-facing message; cart
//! rule violations are expected outcomes and are not captured.

use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::LoadError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog load failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] LoadError),

    /// Cart mutation rejected or not persisted.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AppError {
    /// Returns true for failures of the environment rather than of user input.
    #[must_use]
    pub const fn is_operational(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::Catalog(_) | Self::Storage(_) | Self::Cart(CartError::Storage(_))
        )
    }

    /// Capture operational errors and return the message to show the user.
    #[must_use]
    pub fn report(&self) -> String {
        if self.is_operational() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Storefront error"
            );
        } else {
            tracing::info!(error = %self, "Cart request rejected");
        }

        // Don't expose internal error details to users
        match self {
            Self::Config(e) => format!("Configuration error: {e}"),
            Self::Catalog(_) => "Products could not be loaded".to_string(),
            Self::Cart(e) => e.notice(),
            Self::Storage(_) => "Your cart could not be saved, please try again".to_string(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item", Some(&[("product_id", "A")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
