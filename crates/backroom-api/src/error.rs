//! Error taxonomy for the catalog API layer.
//!
//! Every failure is converted to a user-visible status string at the
//! controller boundary; nothing propagates past it and nothing is retried.

use thiserror::Error;

/// A failed catalog API round trip.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("server returned HTTP {0}")]
    Status(u16),

    /// The request never completed: connect failure, timeout, DNS, TLS.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered 2xx but the body did not match the record shape.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}
