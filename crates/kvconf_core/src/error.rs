//! Error types for kvconf core.

use kvconf_store::StoreError;
use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, ConfigError>;

/// Classification of a [`ConfigError`].
///
/// Transports dispatch on this, never on the error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The named resource does not exist.
    NotFound,
    /// The request itself is invalid.
    InvalidInput,
    /// Anything else, including backing-store failures.
    Unclassified,
}

/// Errors that can occur in kvconf core operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A key was not found.
    #[error("Resource with id '{id}' not found")]
    NotFound {
        /// The missing key.
        id: String,
    },

    /// The request was rejected.
    #[error("{reason}")]
    InvalidInput {
        /// Why the request was rejected.
        reason: String,
    },

    /// The backing store failed.
    #[error(transparent)]
    Store(StoreError),
}

impl ConfigError {
    /// Creates a not-found error for `id`.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Creates an invalid-input error.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Returns the classification of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConfigError::NotFound { .. } => ErrorKind::NotFound,
            ConfigError::InvalidInput { .. } => ErrorKind::InvalidInput,
            ConfigError::Store(_) => ErrorKind::Unclassified,
        }
    }
}

impl From<StoreError> for ConfigError {
    fn from(err: StoreError) -> Self {
        match err {
            // The cursor came from the caller, so this is the caller's fault.
            StoreError::InvalidCursor(_) => ConfigError::invalid_input(err.to_string()),
            other => ConfigError::Store(other),
        }
    }
}
