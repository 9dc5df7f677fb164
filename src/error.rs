//! Error types for the fetch lifecycle.

use thiserror::Error;

/// Failures a single fetch attempt can produce.
///
/// Every variant is treated as transient by the retry policy; the variant only
/// matters for logging and for the user-facing message once retries are
/// exhausted.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network-level failure (connection refused, timeout, DNS, ...)
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered outside the 2xx range
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The body did not decode to a usable quotation
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}
