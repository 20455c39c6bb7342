//! Page fetching collaborators.
//!
//! The extraction pipeline only needs the HTML body of a page. `Fetcher`
//! abstracts over how it is obtained; `HttpFetcher` is the `reqwest`-backed
//! default. Timeouts and redirects are handled here, never in the pipeline.

use std::env;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use url::Url;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; rs-linkpreview/0.1)";

/// Default redirect limit.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Page fetch error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Request timed out
    #[error("Timeout fetching: {0}")]
    Timeout(String),

    /// Transport or body decoding failure
    #[error("HTTP error: {0}")]
    Http(String),

    /// HTTP non-success status
    #[error("HTTP {0} for: {1}")]
    Status(u16, String),

    /// Only http and https can be fetched
    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
}

impl FetchError {
    fn from_reqwest(err: &reqwest::Error, uri: &Url) -> Self {
        if err.is_timeout() {
            Self::Timeout(uri.to_string())
        } else {
            Self::Http(err.to_string())
        }
    }
}

/// Configuration for page fetching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Timeout per request (default: 10s)
    pub timeout: Duration,
    /// `User-Agent` header sent with every request
    pub user_agent: String,
    /// Maximum redirects followed (default: 5)
    pub max_redirects: usize,
}

impl FetchConfig {
    /// Load configuration from environment variables
    ///
    /// Reads `LINKPREVIEW_TIMEOUT_SECS`, `LINKPREVIEW_USER_AGENT` and
    /// `LINKPREVIEW_MAX_REDIRECTS`; missing or unparseable values keep the
    /// defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            timeout: env::var("LINKPREVIEW_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map_or(defaults.timeout, Duration::from_secs),
            user_agent: env::var("LINKPREVIEW_USER_AGENT")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.user_agent),
            max_redirects: env::var("LINKPREVIEW_MAX_REDIRECTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.max_redirects),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout.is_zero() {
            return Err("timeout must be greater than zero".to_string());
        }
        Ok(())
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

/// Retrieves the decoded HTML body of a page.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `uri`, suspending only on network I/O.
    async fn fetch(&self, uri: &Url) -> Result<String, FetchError>;

    /// Fetch `uri`, blocking the current thread.
    fn fetch_blocking(&self, uri: &Url) -> Result<String, FetchError>;
}

/// `reqwest`-backed fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    config: FetchConfig,
}

impl HttpFetcher {
    /// Create a fetcher from the given configuration.
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        config.validate().map_err(FetchError::Http)?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| FetchError::Http(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Configuration the client was built from.
    #[must_use]
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn check_scheme(uri: &Url) -> Result<(), FetchError> {
        if matches!(uri.scheme(), "http" | "https") {
            Ok(())
        } else {
            Err(FetchError::UnsupportedScheme(uri.to_string()))
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, uri: &Url) -> Result<String, FetchError> {
        Self::check_scheme(uri)?;
        debug!("Fetching page: {}", uri);

        let response = self
            .client
            .get(uri.clone())
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(&e, uri))?;

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP {} for: {}", status.as_u16(), uri);
            return Err(FetchError::Status(status.as_u16(), uri.to_string()));
        }

        let html = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(&e, uri))?;

        info!("Fetched {} bytes from: {}", html.len(), uri);
        Ok(html)
    }

    fn fetch_blocking(&self, uri: &Url) -> Result<String, FetchError> {
        Self::check_scheme(uri)?;
        debug!("Fetching page (blocking): {}", uri);

        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout)
            .user_agent(self.config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(self.config.max_redirects))
            .build()
            .map_err(|e| FetchError::Http(e.to_string()))?;

        let response = client
            .get(uri.clone())
            .send()
            .map_err(|e| FetchError::from_reqwest(&e, uri))?;

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP {} for: {}", status.as_u16(), uri);
            return Err(FetchError::Status(status.as_u16(), uri.to_string()));
        }

        let html = response
            .text()
            .map_err(|e| FetchError::from_reqwest(&e, uri))?;

        info!("Fetched {} bytes from: {}", html.len(), uri);
        Ok(html)
    }
}
