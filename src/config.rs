//! Runtime configuration.
//!
//! One base URL constructs both upstream request URLs; everything else is
//! timeouts and the certificate-domain prefix used to validate detail links.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default upstream base: the proxy path in front of the certification
/// service's listing pages.
pub const DEFAULT_BASE_URL: &str = "https://www.thestreetlamp.com/apps/verisart";

/// Default certificate-domain prefix a detail anchor must start with.
pub const DEFAULT_CERTIFICATE_PREFIX: &str = "https://verisart.com/works/";

/// Configuration for the catalog fetcher and pairing workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL for the upstream listing service.
    pub base_url: String,
    /// Prefix a detail-page anchor must start with to count as a
    /// certificate link.
    pub certificate_prefix: String,
    /// Timeout for listing/detail fetches, in milliseconds.
    pub fetch_timeout_ms: u64,
    /// Timeout for a single tag write, in milliseconds.
    pub write_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            certificate_prefix: DEFAULT_CERTIFICATE_PREFIX.to_string(),
            fetch_timeout_ms: 15_000,
            write_timeout_ms: 10_000,
        }
    }
}

impl Config {
    /// Replace the upstream base URL. Trailing slashes are stripped so the
    /// fetcher can join paths uniformly.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Replace the certificate-domain prefix.
    pub fn with_certificate_prefix(mut self, prefix: &str) -> Self {
        self.certificate_prefix = prefix.to_string();
        self
    }

    /// Fetch timeout as a [`Duration`].
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// Write timeout as a [`Duration`].
    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert!(cfg.certificate_prefix.starts_with("https://"));
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let cfg = Config::default().with_base_url("http://localhost:7700/");
        assert_eq!(cfg.base_url, "http://localhost:7700");
    }
}
