//! Redis-backed store.

use crate::backend::{KeyValueStore, ScanPage};
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tracing::{debug, info};

/// A store backed by a Redis server.
///
/// All requests share one multiplexed connection. The underlying
/// [`ConnectionManager`] reconnects after a dropped connection; the failed
/// call itself is not retried and surfaces its error once.
///
/// Every method issues exactly one Redis command:
///
/// | Method | Command |
/// |---|---|
/// | `set` | `SET key value` |
/// | `get` | `GET key` |
/// | `scan` | `SCAN cursor MATCH pattern COUNT count` |
/// | `delete` | `DEL key` |
/// | `dbsize` | `DBSIZE` |
/// | `ping` | `PING` |
#[derive(Clone)]
pub struct RedisStore {
    manager: ConnectionManager,
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").finish_non_exhaustive()
    }
}

impl RedisStore {
    /// Connects to the Redis server at `url` (e.g. `redis://localhost:6379`).
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed or the server cannot be reached.
    pub async fn connect(url: &str) -> StoreResult<Self> {
        let client = redis::Client::open(url)
            .map_err(|e| StoreError::Connection(format!("invalid store url '{url}': {e}")))?;
        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        info!(url = %redacted(url), "Connected to backing store");
        Ok(Self { manager })
    }

    fn conn(&self) -> ConnectionManager {
        self.manager.clone()
    }
}

/// Strips credentials from a store URL before it is logged.
fn redacted(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            format!("{}://***{}", &url[..scheme_end], &url[at..])
        }
        _ => url.to_string(),
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn set(&self, key: &str, value: &str) -> StoreResult<bool> {
        let reply: Option<String> = self.conn().set(key, value).await?;
        Ok(reply.as_deref() == Some("OK"))
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.conn().get(key).await?)
    }

    async fn scan(&self, cursor: &str, pattern: &str, count: usize) -> StoreResult<ScanPage> {
        let (cursor, keys): (String, Vec<String>) = redis::cmd("SCAN")
            .arg(cursor)
            .arg("MATCH")
            .arg(pattern)
            .arg("COUNT")
            .arg(count)
            .query_async(&mut self.conn())
            .await?;
        debug!(returned = keys.len(), next = %cursor, "SCAN");
        Ok(ScanPage { cursor, keys })
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        let removed: u64 = self.conn().del(key).await?;
        Ok(removed > 0)
    }

    async fn dbsize(&self) -> StoreResult<u64> {
        let size: u64 = redis::cmd("DBSIZE").query_async(&mut self.conn()).await?;
        Ok(size)
    }

    async fn ping(&self) -> StoreResult<()> {
        let pong: String = redis::cmd("PING").query_async(&mut self.conn()).await?;
        if pong == "PONG" {
            Ok(())
        } else {
            Err(StoreError::Backend(format!("unexpected PING reply: {pong}")))
        }
    }
}
