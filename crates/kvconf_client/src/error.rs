//! Error types for the HTTP client.

use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors returned by [`ConfigClient`](crate::ConfigClient).
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request could not be sent or the response could not be read.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error status.
    #[error("{reason} (HTTP {status})")]
    Api {
        /// HTTP status code.
        status: u16,
        /// The `reason` field of the error body.
        reason: String,
    },

    /// The server URL cannot carry request paths.
    #[error("invalid server url: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Returns true if the server reported the key as missing.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// Returns true if the server rejected the request as invalid.
    #[must_use]
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::Api { status: 400, .. })
    }
}
