//! Backend connection settings.

use crate::FetchError;
use std::time::Duration;

/// Environment variable holding the backend base URL.
pub const BACKEND_URL_ENV: &str = "PRICEFLOW_BACKEND_URL";

/// Base URL when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5014/api/v1";

/// Where the backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    /// Per-request timeout. Unset means the transport default.
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

impl ApiConfig {
    /// Create a config for `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(FetchError::InvalidUrl(base_url));
        }
        Ok(Self {
            base_url: trimmed.to_string(),
            timeout: None,
        })
    }

    /// Read the base URL from the environment, loading `.env` first.
    pub fn from_env() -> Result<Self, FetchError> {
        Self::resolve(None)
    }

    /// Pick the base URL: environment first, then `configured`, then the
    /// default.
    pub fn resolve(configured: Option<&str>) -> Result<Self, FetchError> {
        let _ = dotenvy::dotenv();
        let from_env = std::env::var(BACKEND_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty());

        match from_env.as_deref().or(configured) {
            Some(url) => Self::new(url),
            None => Ok(Self::default()),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join a path onto the base URL. Absolute URLs pass through.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        assert_eq!(ApiConfig::default().base_url(), "http://localhost:5014/api/v1");
        assert_eq!(ApiConfig::default().timeout, None);
    }

    #[test]
    fn test_url_join() {
        let config = ApiConfig::new("https://shop.example.com/api/v1/").unwrap();
        assert_eq!(config.url("/products"), "https://shop.example.com/api/v1/products");
        assert_eq!(config.url("products"), "https://shop.example.com/api/v1/products");
        assert_eq!(config.url("https://cdn.example.com/x"), "https://cdn.example.com/x");
    }

    #[test]
    fn test_resolve_prefers_configured_over_default() {
        if std::env::var_os(BACKEND_URL_ENV).is_some() {
            return;
        }
        let config = ApiConfig::resolve(Some("https://shop.example.com/api/v1")).unwrap();
        assert_eq!(config.base_url(), "https://shop.example.com/api/v1");
        assert_eq!(ApiConfig::resolve(None).unwrap(), ApiConfig::default());
    }

    #[test]
    fn test_rejects_non_http_base() {
        assert!(matches!(
            ApiConfig::new("localhost:5014"),
            Err(FetchError::InvalidUrl(_))
        ));
    }
}
