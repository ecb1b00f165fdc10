//! Error types for the fetch client
//!
//! Provides unified error handling using thiserror. The cache itself never
//! fails; these cover fetching, parsing and image-format resolution.

use thiserror::Error;

use crate::cache::CacheCategory;

// == Fetch Error Enum ==
/// Unified error type for the client.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Unexpected status {status} for {url}")]
    Status { url: String, status: u16 },

    /// Page did not contain the expected data
    #[error("Parse error: {0}")]
    Parse(String),

    /// Embedded JSON could not be decoded
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A cache category held a value of the wrong kind
    #[error("Unexpected value cached under {category} for key {key}")]
    UnexpectedCacheValue { category: CacheCategory, key: String },

    /// Requested image format is not among the known constants
    #[error("Unknown image format: {0}")]
    UnknownImageFormat(String),
}

// == Result Type Alias ==
/// Convenience Result type for the client.
pub type Result<T> = std::result::Result<T, FetchError>;
