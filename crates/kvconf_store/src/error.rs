//! Error types for store operations.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while talking to the backing store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or the connection was lost.
    #[error("connection error: {0}")]
    Connection(String),

    /// The store answered with an error.
    #[error("{0}")]
    Backend(String),

    /// A scan cursor was not issued by this store.
    #[error("invalid cursor '{0}'")]
    InvalidCursor(String),

    /// The store has been closed.
    #[error("store is closed")]
    Closed,
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_refusal() || err.is_connection_dropped() || err.is_io_error() {
            StoreError::Connection(err.to_string())
        } else {
            StoreError::Backend(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        assert_eq!(
            StoreError::InvalidCursor("abc".into()).to_string(),
            "invalid cursor 'abc'"
        );
        assert_eq!(StoreError::Backend("ERR boom".into()).to_string(), "ERR boom");
        assert_eq!(StoreError::Closed.to_string(), "store is closed");
    }

    #[test]
    fn redis_type_error_is_backend() {
        let err = redis::RedisError::from((redis::ErrorKind::TypeError, "wrong type"));
        assert!(matches!(StoreError::from(err), StoreError::Backend(_)));
    }

    #[test]
    fn redis_io_error_is_connection() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = redis::RedisError::from(io);
        assert!(matches!(StoreError::from(err), StoreError::Connection(_)));
    }
}
