//! HTTP transport abstraction for the quotation endpoint.
//!
//! The controller only needs a status code and a body; keeping the trait at
//! that level makes the retry lifecycle testable without real network calls.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::FetchError;

/// Raw result of one outbound request, before any status or shape checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Trait for issuing the outbound GET.
///
/// `HttpTransport` is the production implementation; tests substitute a
/// scripted mock so failure sequences can be replayed deterministically.
#[async_trait]
pub trait QuoteTransport: Send + Sync + 'static {
    /// Perform one GET against `url`.
    ///
    /// Only network-level problems are errors here; a non-2xx status still
    /// resolves to `Ok` and is judged by the caller.
    async fn fetch(&self, url: &str) -> Result<RawResponse, FetchError>;
}

/// Production transport backed by reqwest.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteTransport for HttpTransport {
    async fn fetch(&self, url: &str) -> Result<RawResponse, FetchError> {
        debug!(url = %url, "Issuing quotation request");

        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(status = status, body_len = body.len(), "Quotation request completed");

        Ok(RawResponse { status, body })
    }
}

impl Clone for HttpTransport {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}
