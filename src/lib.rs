//! # rs-linkpreview
//!
//! Extracts link-preview metadata from web pages: title, description,
//! keywords, Open Graph tags, images, language and a sanitized inline copy of
//! the page content.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_linkpreview::extract;
//!
//! let html = r#"<html><head>
//!     <title>My Article</title>
//!     <meta property="og:image" content="https://example.com/cover.png">
//!     <meta name="keywords" content="rust, html">
//! </head><body><div><p>Main <strong>content</strong> here.</p></div></body></html>"#;
//!
//! let metadata = extract("https://example.com/article", html);
//! assert_eq!(metadata.title, "My Article");
//! assert_eq!(metadata.images, vec!["https://example.com/cover.png"]);
//! assert_eq!(metadata.keywords, vec!["rust", "html"]);
//! assert!(metadata.content.ends_with("Main <strong>content</strong> here."));
//! ```
//!
//! ## Fallbacks
//!
//! - **Title**: `og:title`, then `<head><title>`
//! - **Description**: `og:description`, then `<meta name="description">`,
//!   then the first 300 characters of the page text
//! - **Images**: `og:image`, then every `<img src>`, then the configured
//!   default image
//!
//! The extraction itself never fails. Only fetching a page can return an
//! error.

mod error;
mod options;
mod patterns;
mod result;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Owned node arena used for tree rewriting.
pub mod tree;

/// Content sanitizer (whitelist flattening).
pub mod sanitize;

/// Metadata extraction (meta tag readers, Open Graph, fallback waterfall).
pub mod metadata;

/// Page fetcher collaborator.
pub mod fetch;

/// Language detector collaborator.
pub mod language;

use std::sync::Arc;

use url::Url;

// Public API - re-exports
pub use error::{Error, Result};
pub use fetch::{FetchConfig, FetchError, Fetcher, HttpFetcher};
pub use language::{FixedLanguage, LanguageDetector, WhatlangDetector};
pub use options::Options;
pub use result::{Metadata, OpenGraphTag};

/// Extracts preview metadata from raw HTML using default options.
///
/// `uri` is recorded verbatim in `Metadata::url`; it is not fetched.
#[must_use]
pub fn extract(uri: &str, html: &str) -> Metadata {
    extract_with_options(uri, html, &Options::default())
}

/// Extracts preview metadata from raw HTML with custom options.
///
/// # Example
///
/// ```rust
/// use rs_linkpreview::{extract_with_options, Options};
///
/// let options = Options {
///     default_image: Some("https://example.com/placeholder.png".to_string()),
///     ..Options::default()
/// };
/// let metadata = extract_with_options("https://example.com/", "<p>No images</p>", &options);
/// assert_eq!(metadata.images, vec!["https://example.com/placeholder.png"]);
/// ```
#[must_use]
pub fn extract_with_options(uri: &str, html: &str, options: &Options) -> Metadata {
    metadata::extract_metadata(uri, html, options, &WhatlangDetector)
}

/// Extraction pipeline wired to a page fetcher and a language detector.
///
/// Holds no per-call state, so one `Extractor` can serve concurrent callers.
#[derive(Clone)]
pub struct Extractor {
    options: Options,
    fetcher: Arc<dyn Fetcher>,
    detector: Arc<dyn LanguageDetector>,
}

impl std::fmt::Debug for Extractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Extractor {
    /// Create an extractor with the HTTP fetcher and the whatlang detector.
    pub fn new(options: Options) -> Result<Self> {
        let fetcher = HttpFetcher::new(options.fetch.clone())?;
        Ok(Self::with_collaborators(
            options,
            Arc::new(fetcher),
            Arc::new(WhatlangDetector),
        ))
    }

    /// Create an extractor with caller-supplied collaborators.
    #[must_use]
    pub fn with_collaborators(
        options: Options,
        fetcher: Arc<dyn Fetcher>,
        detector: Arc<dyn LanguageDetector>,
    ) -> Self {
        Self {
            options,
            fetcher,
            detector,
        }
    }

    /// Options applied to every extraction.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Run the pipeline on HTML the caller already has.
    #[must_use]
    pub fn extract(&self, uri: &str, html: &str) -> Metadata {
        metadata::extract_metadata(uri, html, &self.options, self.detector.as_ref())
    }

    /// Fetch `uri` and extract its metadata.
    ///
    /// Suspends only while fetching; the extraction runs to completion
    /// synchronously afterwards.
    pub async fn fetch(&self, uri: &str) -> Result<Metadata> {
        let url = Url::parse(uri)?;
        let html = self.fetcher.fetch(&url).await?;
        Ok(self.extract(url.as_str(), &html))
    }

    /// Fetch `uri` with a blocking request and extract its metadata.
    ///
    /// Must not be called from within an async runtime when the default
    /// `HttpFetcher` is used.
    pub fn fetch_blocking(&self, uri: &str) -> Result<Metadata> {
        let url = Url::parse(uri)?;
        let html = self.fetcher.fetch_blocking(&url)?;
        Ok(self.extract(url.as_str(), &html))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_with_fixed_detector() {
        let extractor = Extractor::with_collaborators(
            Options::default(),
            Arc::new(NoFetch),
            Arc::new(FixedLanguage::new("xx")),
        );

        let metadata = extractor.extract("https://example.com/", "<p>Hi</p>");
        assert_eq!(metadata.language, "xx");
        assert_eq!(metadata.url, "https://example.com/");
    }

    #[test]
    fn test_options_accessor() {
        let options = Options {
            default_image: Some("/fallback.png".to_string()),
            ..Options::default()
        };
        let extractor = Extractor::with_collaborators(
            options.clone(),
            Arc::new(NoFetch),
            Arc::new(FixedLanguage::new("en")),
        );

        assert_eq!(extractor.options(), &options);
    }

    #[test]
    fn test_invalid_url_is_reported() {
        let extractor = Extractor::with_collaborators(
            Options::default(),
            Arc::new(NoFetch),
            Arc::new(FixedLanguage::new("en")),
        );

        assert!(matches!(
            extractor.fetch_blocking("not a url"),
            Err(Error::InvalidUrl(_))
        ));
    }

    struct NoFetch;

    #[async_trait::async_trait]
    impl Fetcher for NoFetch {
        async fn fetch(&self, uri: &Url) -> std::result::Result<String, FetchError> {
            Err(FetchError::Http(format!("offline: {uri}")))
        }

        fn fetch_blocking(&self, uri: &Url) -> std::result::Result<String, FetchError> {
            Err(FetchError::Http(format!("offline: {uri}")))
        }
    }
}
