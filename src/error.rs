//! Error types for rs-linkpreview.
//!
//! The extraction pipeline itself never fails; errors only come from the
//! collaborators around it (URI parsing and page fetching).

use crate::fetch::FetchError;

/// Error type for fetch-and-extract operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested URI could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The page fetcher failed to retrieve the document.
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),
}

/// Result type alias for fetch-and-extract operations.
pub type Result<T> = std::result::Result<T, Error>;
