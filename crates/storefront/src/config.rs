//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `VITRINE_CATALOG_URL` - Catalog endpoint returning the product document
//!
//! ## Optional
//! - `VITRINE_DATA_DIR` - Directory for persisted cart state (default: .vitrine)
//! - `VITRINE_CART_KEY` - Storage key for the cart (default: cart)
//! - `VITRINE_FETCH_TIMEOUT_SECS` - Catalog request timeout (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_DATA_DIR: &str = ".vitrine";
const DEFAULT_CART_KEY: &str = "cart";
const DEFAULT_FETCH_TIMEOUT_SECS: &str = "10";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog endpoint
    pub catalog_url: Url,
    /// Directory holding persisted cart state
    pub data_dir: PathBuf,
    /// Storage key for the cart
    pub cart_key: String,
    /// Catalog request timeout
    pub fetch_timeout: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        let catalog_url = vars.required("VITRINE_CATALOG_URL")?;
        let catalog_url = parse_catalog_url(&catalog_url).map_err(|reason| {
            ConfigError::InvalidEnvVar("VITRINE_CATALOG_URL".to_string(), reason)
        })?;

        let data_dir = PathBuf::from(vars.or_default("VITRINE_DATA_DIR", DEFAULT_DATA_DIR));
        let cart_key = vars.or_default("VITRINE_CART_KEY", DEFAULT_CART_KEY);

        let fetch_timeout = vars
            .or_default("VITRINE_FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT_SECS)
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("VITRINE_FETCH_TIMEOUT_SECS".to_string(), e.to_string())
            })
            .map(Duration::from_secs)?;

        Ok(Self {
            catalog_url,
            data_dir,
            cart_key,
            fetch_timeout,
            sentry_dsn: vars.optional("SENTRY_DSN"),
            sentry_environment: vars.optional("SENTRY_ENVIRONMENT"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Vars<F>(F);

impl<F: Fn(&str) -> Option<String>> Vars<F> {
    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an optional variable, treating empty values as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }
}

/// Parse the catalog endpoint, accepting only http(s) URLs.
fn parse_catalog_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported scheme '{other}'")),
    }
}
