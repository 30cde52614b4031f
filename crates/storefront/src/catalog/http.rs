//! HTTP catalog provider.
//!
//! Uses `reqwest` to GET the configured endpoint. A non-success status wins
//! over any body read failure. Successful bodies are read as text first so
//! parse failures can be logged with a snippet of what came back.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, error, instrument};
use url::Url;

use super::{CatalogSource, LoadError};

/// Maximum number of body characters included in error logs.
const BODY_SNIPPET_LEN: usize = 500;

/// [`CatalogSource`] fetching the catalog document over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpCatalogSource {
    /// Create a provider for `url` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Http`] if the HTTP client cannot be built.
    pub fn new(url: Url, timeout: Duration) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, url })
    }

    /// Returns the endpoint this provider fetches from.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

impl CatalogSource for HttpCatalogSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<Value, LoadError> {
        let response = self
            .client
            .get(self.url.clone())
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                status = %status,
                body = %snippet(&body),
                "Catalog endpoint returned non-success status"
            );
            return Err(LoadError::Status(status.as_u16()));
        }

        let body = response.text().await?;

        match serde_json::from_str(&body) {
            Ok(payload) => {
                debug!(bytes = body.len(), "Catalog payload received");
                Ok(payload)
            }
            Err(e) => {
                error!(
                    error = %e,
                    body = %snippet(&body),
                    "Failed to parse catalog payload"
                );
                Err(LoadError::Parse(e))
            }
        }
    }
}

fn snippet(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_LEN).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_keeps_url() {
        let url = Url::parse("https://example.com/catalog.json").unwrap();
        let source = HttpCatalogSource::new(url.clone(), Duration::from_secs(5)).unwrap();
        assert_eq!(source.url(), &url);
    }

    #[test]
    fn test_snippet_truncates_on_char_boundary() {
        let body = "я".repeat(BODY_SNIPPET_LEN + 10);
        assert_eq!(snippet(&body).chars().count(), BODY_SNIPPET_LEN);
        assert_eq!(snippet("short"), "short");
    }
}
