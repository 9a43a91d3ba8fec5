//! Serve command implementation.

use clap::Args;
use kvconf_server::{shutdown_signal, ConfigServer, ServerConfig, DEFAULT_TITLE};
use kvconf_store::{InMemoryStore, KeyValueStore, RedisStore};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Options for `kvconf serve`.
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Interface to listen on
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "8000")]
    pub port: u16,

    /// Backing store URL
    #[arg(long, env = "REDIS_URL", default_value = "redis://localhost:6379")]
    pub redis_url: String,

    /// max-age (seconds) sent with single-object reads
    #[arg(long, env = "DEFAULT_CACHE_AGE", default_value = "0")]
    pub default_cache_age: u64,

    /// Directory of static dashboard assets
    #[arg(long, env = "STATIC_ROOT")]
    pub static_root: Option<PathBuf>,

    /// Service name reported by /api
    #[arg(long, default_value = DEFAULT_TITLE)]
    pub title: String,

    /// Keep configuration in process memory instead of the backing store
    #[arg(long)]
    pub memory: bool,
}

impl ServeArgs {
    /// Builds the server configuration.
    pub fn server_config(&self) -> Result<ServerConfig, Box<dyn std::error::Error>> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|e| format!("invalid host '{}': {e}", self.host))?;

        let mut config = ServerConfig::new(SocketAddr::new(ip, self.port))
            .with_default_cache_age(self.default_cache_age)
            .with_title(&self.title);
        if let Some(root) = &self.static_root {
            config = config.with_static_root(root);
        }
        Ok(config)
    }
}

/// Runs the serve command.
pub async fn run(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.server_config()?;

    let store: Arc<dyn KeyValueStore> = if args.memory {
        warn!("Using in-memory store; configuration is lost on exit");
        Arc::new(InMemoryStore::new())
    } else {
        Arc::new(RedisStore::connect(&args.redis_url).await?)
    };

    let server = ConfigServer::new(config, store)?;
    let listener = server.bind().await?;
    if let Some(root) = &server.config().static_root {
        info!(root = %root.display(), "Serving static assets");
    }

    server.run(listener, shutdown_signal()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(host: &str) -> ServeArgs {
        ServeArgs {
            host: host.to_string(),
            port: 9100,
            redis_url: "redis://localhost:6379".to_string(),
            default_cache_age: 30,
            static_root: None,
            title: DEFAULT_TITLE.to_string(),
            memory: true,
        }
    }

    #[test]
    fn builds_server_config() {
        let config = args("127.0.0.1").server_config().unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:9100".parse().unwrap());
        assert_eq!(config.cache_control(), "max-age=30");
        assert_eq!(config.title, DEFAULT_TITLE);
    }

    #[test]
    fn rejects_hostnames() {
        let err = args("localhost").server_config().unwrap_err();
        assert!(err.to_string().contains("invalid host"));
    }
}
