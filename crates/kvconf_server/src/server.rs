//! Router assembly and server lifecycle.

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::handler::{self, AppState};
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use kvconf_core::ConfigService;
use kvconf_store::KeyValueStore;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::services::ServeDir;
use tracing::{info, warn};

/// Builds the application router.
///
/// Paths no route claims fall through to the static root, when one is set.
pub fn build_app(state: AppState) -> Router {
    let static_root = state.config.static_root.clone();
    let max_body_bytes = state.config.max_body_bytes;

    let app = Router::new()
        .route(
            "/config",
            get(handler::list_config).post(handler::create_config),
        )
        .route(
            "/config/{key}",
            get(handler::get_config).delete(handler::delete_config),
        )
        .route("/api", get(handler::hello))
        .route("/livez", get(handler::livez))
        .route("/readyz", get(handler::readyz))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state);

    match static_root {
        Some(root) => app.fallback_service(ServeDir::new(root)),
        None => app,
    }
}

/// The configuration server.
///
/// Owns the shared store handle for its whole life: every request borrows
/// it through [`ConfigService`], and it is closed once the server has
/// drained.
///
/// # Example
///
/// ```rust,no_run
/// use kvconf_server::{shutdown_signal, ConfigServer, ServerConfig};
/// use kvconf_store::InMemoryStore;
/// use std::sync::Arc;
///
/// # async fn run() -> kvconf_server::ServerResult<()> {
/// let server = ConfigServer::new(ServerConfig::default(), Arc::new(InMemoryStore::new()))?;
/// let listener = server.bind().await?;
/// server.run(listener, shutdown_signal()).await
/// # }
/// ```
pub struct ConfigServer {
    config: Arc<ServerConfig>,
    service: ConfigService,
}

impl ConfigServer {
    /// Creates a server over `store`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn new(config: ServerConfig, store: Arc<dyn KeyValueStore>) -> ServerResult<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            service: ConfigService::new(store),
        })
    }

    /// Returns the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the router serving this server's routes.
    pub fn router(&self) -> Router {
        build_app(AppState::new(
            self.service.clone(),
            Arc::clone(&self.config),
        ))
    }

    /// Binds the configured address.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn bind(&self) -> ServerResult<TcpListener> {
        Ok(TcpListener::bind(self.config.bind_addr).await?)
    }

    /// Serves requests on `listener` until `shutdown` resolves, then closes
    /// the store.
    ///
    /// # Errors
    ///
    /// Returns an error if serving fails or the store does not close cleanly.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> ServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        info!(addr = %addr, title = %self.config.title, "Starting server");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        self.service.close().await?;
        info!("Server stopped");
        Ok(())
    }
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServerError;
    use kvconf_store::InMemoryStore;

    #[test]
    fn new_validates_config() {
        let config = ServerConfig::default().with_max_body_bytes(0);
        let result = ConfigServer::new(config, Arc::new(InMemoryStore::new()));
        assert!(matches!(result, Err(ServerError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn run_closes_store_after_shutdown() {
        let store = Arc::new(InMemoryStore::new());
        let config = ServerConfig::new("127.0.0.1:0".parse().unwrap());
        let server = ConfigServer::new(config, store.clone()).unwrap();
        let listener = server.bind().await.unwrap();

        server.run(listener, async {}).await.unwrap();

        assert!(store.ping().await.is_err());
    }
}
