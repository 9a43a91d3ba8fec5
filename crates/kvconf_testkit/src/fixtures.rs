//! Test fixtures and server helpers.
//!
//! Provides seeded stores and an in-process HTTP server bound to an
//! ephemeral port.

use kvconf_server::{ConfigServer, ServerConfig, ServerResult};
use kvconf_store::{InMemoryStore, KeyValueStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Returns `n` entries named `<prefix>.NNN` with value `value-NNN`.
///
/// Keys are zero-padded so lexical and numeric order agree.
pub fn seeded_entries(prefix: &str, n: usize) -> Vec<(String, String)> {
    (0..n)
        .map(|i| (format!("{prefix}.{i:03}"), format!("value-{i:03}")))
        .collect()
}

/// Creates an in-memory store holding [`seeded_entries`] for `prefix`.
pub fn seeded_store(prefix: &str, n: usize) -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::with_entries(seeded_entries(prefix, n)))
}

/// A configuration server running on `127.0.0.1` with an ephemeral port.
///
/// The server shuts down gracefully when [`TestServer::shutdown`] is called
/// or the value is dropped.
pub struct TestServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<ServerResult<()>>>,
}

impl TestServer {
    /// Starts a server over an empty in-memory store.
    pub async fn start() -> Self {
        Self::start_with_store(Arc::new(InMemoryStore::new())).await
    }

    /// Starts a server over `store` with default configuration.
    pub async fn start_with_store(store: Arc<dyn KeyValueStore>) -> Self {
        Self::start_with(ServerConfig::default(), store).await
    }

    /// Starts a server over `store` with `config`.
    ///
    /// The bind address in `config` is replaced with an ephemeral port.
    pub async fn start_with(config: ServerConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let config = ServerConfig {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            ..config
        };
        let server = ConfigServer::new(config, store).expect("Invalid test server config");
        let listener = server.bind().await.expect("Failed to bind test server");
        let addr = listener.local_addr().expect("Failed to read local address");

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(server.run(listener, async {
            let _ = shutdown_rx.await;
        }));

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    /// Returns the bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Returns the base URL, e.g. `http://127.0.0.1:41234`.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stops the server and waits for it to finish.
    pub async fn shutdown(mut self) -> ServerResult<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        match self.handle.take() {
            Some(handle) => handle.await.expect("Test server task panicked"),
            None => Ok(()),
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
