//! Result types for extraction output.
//!
//! `Metadata` is the single value produced per extraction call. It owns all of
//! its data and carries no link back to the parsed document.

use serde::{Deserialize, Serialize};

/// A single `<meta property="og:*">` entry, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenGraphTag {
    /// Property name, always starting with `og:`.
    pub key: String,

    /// Raw `content` attribute value.
    pub value: String,
}

impl OpenGraphTag {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Preview metadata extracted from an HTML document.
///
/// String fields are never absent: unknown values are empty strings.
/// `title`, `description` and `content` carry no surrounding whitespace, and
/// `images`/`keywords` never contain empty entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Page title (`og:title`, else `<head><title>`).
    pub title: String,

    /// Page description (`og:description`, else meta description, else a
    /// prefix of the page text).
    pub description: String,

    /// Entries of `<meta name="keywords">`, in source order.
    pub keywords: Vec<String>,

    /// Every `og:*` meta tag in document order, duplicates included.
    #[serde(rename = "openGraphTags")]
    pub open_graph_tags: Vec<OpenGraphTag>,

    /// Image URLs, verbatim from the source attributes.
    pub images: Vec<String>,

    /// Sanitized HTML fragment of the page content.
    pub content: String,

    /// The unmodified HTML input.
    pub raw: String,

    /// String form of the requested URI.
    pub url: String,

    /// Language code reported by the detector.
    pub language: String,
}

impl Metadata {
    /// First value of the given Open Graph key, if present.
    #[must_use]
    pub fn open_graph(&self, key: &str) -> Option<&str> {
        self.open_graph_tags
            .iter()
            .find(|tag| tag.key == key)
            .map(|tag| tag.value.as_str())
    }
}
