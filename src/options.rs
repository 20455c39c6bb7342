//! Configuration options for metadata extraction.
//!
//! The `Options` struct controls the fallback behavior of the pipeline and
//! carries the settings handed to the page fetcher.

use crate::fetch::FetchConfig;

/// Default length (in characters) of the plain-text description fallback.
pub const DEFAULT_DESCRIPTION_LENGTH: usize = 300;

/// Configuration options for metadata extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use rs_linkpreview::Options;
///
/// let options = Options {
///     default_image: Some("https://example.com/placeholder.png".to_string()),
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Image used when the page has neither `og:image` nor any `<img src>`.
    ///
    /// Blank values are treated as unset.
    ///
    /// Default: `None`
    pub default_image: Option<String>,

    /// Number of characters taken from the page text when no description
    /// source exists. The cut is a hard character boundary, not word-aware.
    ///
    /// Default: `300`
    pub description_length: usize,

    /// Settings used by the HTTP page fetcher.
    ///
    /// Default: `FetchConfig::default()`
    pub fetch: FetchConfig,
}

impl Options {
    /// The configured default image, if it is non-blank.
    #[must_use]
    pub fn default_image(&self) -> Option<&str> {
        self.default_image
            .as_deref()
            .filter(|image| !image.trim().is_empty())
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            default_image: None,
            description_length: DEFAULT_DESCRIPTION_LENGTH,
            fetch: FetchConfig::default(),
        }
    }
}
