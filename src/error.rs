//! Error types for table extraction.
//!
//! Only top-level failures surface here. A field that is missing or has the
//! wrong shape inside a record never becomes an error: it degrades to the
//! column default (see [`crate::extract::resolve`]).

use thiserror::Error;

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that abort an extraction call.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A caller-supplied parameter was rejected before any network access.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Token acquisition failed.
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The HTTP request could not be completed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },

    /// The API answered, but the body is not a usable page.
    #[error("malformed API response: {0}")]
    MalformedResponse(String),

    /// API configuration is missing or unreadable.
    #[error("configuration error: {0}")]
    Config(String),
}

impl ExtractError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        ExtractError::InvalidArgument(msg.into())
    }
}
