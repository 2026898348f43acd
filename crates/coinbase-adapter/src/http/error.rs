/*
[INPUT]:  Error sources (HTTP transport, serialization, pagination envelopes)
[OUTPUT]: Structured error types with retry and protocol hints
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use std::time::Duration;

use thiserror::Error;

/// Main error type for the Coinbase adapter
///
/// Non-2xx HTTP statuses are not represented here: the transport hands the raw
/// [`ApiResponse`](crate::http::ApiResponse) back to the caller.
#[derive(Error, Debug)]
pub enum CoinbaseError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request exceeded its deadline
    #[error("Request timed out after {}ms", .duration.as_millis())]
    Timeout { duration: Duration },

    /// Endpoint response lacks the envelope required by the selected pagination protocol
    #[error("Endpoint {path} does not support this pagination protocol: missing '{field}'")]
    PaginationUnsupported { path: String, field: &'static str },

    /// Pagination run was cancelled between pages
    #[error("Pagination of {path} cancelled after {pages} page(s)")]
    Cancelled { path: String, pages: usize },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CoinbaseError {
    /// Check if the error is retryable
    ///
    /// The client never retries on its own; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            CoinbaseError::Http(err) => err.is_connect() || err.is_request(),
            CoinbaseError::Timeout { .. } => true,
            _ => false,
        }
    }

    /// Check if the error signals a pagination protocol mismatch for the endpoint
    pub fn is_protocol_error(&self) -> bool {
        matches!(self, CoinbaseError::PaginationUnsupported { .. })
    }

    /// Map a reqwest failure, separating deadline expiry from other transport errors
    pub(crate) fn from_transport(err: reqwest::Error, deadline: Duration) -> Self {
        if err.is_timeout() {
            CoinbaseError::Timeout { duration: deadline }
        } else {
            CoinbaseError::Http(err)
        }
    }
}

/// Result type alias for Coinbase operations
pub type Result<T> = std::result::Result<T, CoinbaseError>;
