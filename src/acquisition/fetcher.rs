//! Async HTTP client wrapping reqwest.
//!
//! Not a browser — one GET per page, body returned as text. No internal
//! retry: callers own retry policy, so a failed fetch surfaces immediately
//! as a [`PairingError::Network`] carrying the attempted resource.

use crate::config::Config;
use crate::error::{PairingError, PairingResult};
use std::time::Duration;
use tracing::debug;

/// HTTP client for the upstream certification service.
#[derive(Clone)]
pub struct CatalogFetcher {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl CatalogFetcher {
    /// Create a fetcher for the configured base URL.
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout())
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(concat!("veritag/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.fetch_timeout(),
        }
    }

    /// Fetch the catalog listing page (`GET <base>/`).
    pub async fn fetch_listing(&self) -> PairingResult<String> {
        let url = self.endpoint("", "listing")?;
        self.get_text(&url, "listing").await
    }

    /// Fetch one artwork's detail page (`GET <base>/items/{id}`).
    pub async fn fetch_detail(&self, id: &str) -> PairingResult<String> {
        let resource = format!("detail {id}");
        let url = self.endpoint(&format!("items/{id}"), &resource)?;
        self.get_text(&url, &resource).await
    }

    /// Resolve a path suffix against the configured base URL.
    fn endpoint(&self, suffix: &str, resource: &str) -> PairingResult<String> {
        let base = url::Url::parse(&format!("{}/", self.base_url)).map_err(|e| {
            PairingError::Network {
                resource: resource.to_string(),
                reason: format!("invalid base URL {:?}: {e}", self.base_url),
            }
        })?;
        let joined = base.join(suffix).map_err(|e| PairingError::Network {
            resource: resource.to_string(),
            reason: format!("invalid resource path {suffix:?}: {e}"),
        })?;
        Ok(joined.to_string())
    }

    async fn get_text(&self, url: &str, resource: &str) -> PairingResult<String> {
        debug!(url, resource, "fetching");
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| PairingError::network(resource, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PairingError::status(resource, status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| PairingError::network(resource, &e))
    }
}
