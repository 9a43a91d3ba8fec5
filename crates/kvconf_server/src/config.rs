//! Server configuration.

use crate::error::{ServerError, ServerResult};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Title used in the `/api` greeting when none is configured.
pub const DEFAULT_TITLE: &str = "Application Configuration Service";

/// Largest accepted request body when none is configured.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Configuration for the configuration server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_addr: SocketAddr,
    /// `max-age` (seconds) sent with single-object reads.
    pub default_cache_age: u64,
    /// Directory served for any path no route claims.
    pub static_root: Option<PathBuf>,
    /// Service name reported by `/api`.
    pub title: String,
    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl ServerConfig {
    /// Creates a new server configuration.
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            default_cache_age: 0,
            static_root: None,
            title: DEFAULT_TITLE.to_string(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }

    /// Sets the cache age for single-object reads.
    pub fn with_default_cache_age(mut self, seconds: u64) -> Self {
        self.default_cache_age = seconds;
        self
    }

    /// Serves static assets from `root`.
    pub fn with_static_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.static_root = Some(root.into());
        self
    }

    /// Sets the service title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the maximum request body size.
    pub fn with_max_body_bytes(mut self, bytes: usize) -> Self {
        self.max_body_bytes = bytes;
        self
    }

    /// Returns the `Cache-Control` value for single-object reads.
    #[must_use]
    pub fn cache_control(&self) -> String {
        format!("max-age={}", self.default_cache_age)
    }

    /// Checks the configuration before the server starts.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::InvalidConfig`] if the body limit is zero or the
    /// static root is not a directory.
    pub fn validate(&self) -> ServerResult<()> {
        if self.max_body_bytes == 0 {
            return Err(ServerError::InvalidConfig(
                "max_body_bytes must be greater than zero".into(),
            ));
        }
        if let Some(root) = &self.static_root {
            if !root.is_dir() {
                return Err(ServerError::InvalidConfig(format!(
                    "static root '{}' is not a directory",
                    root.display()
                )));
            }
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(SocketAddr::from(([0, 0, 0, 0], 8000)))
    }
}
