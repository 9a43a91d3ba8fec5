//! Configuration operations over a shared store handle.

use crate::error::{ConfigError, CoreResult};
use crate::pagination::paginate;
use crate::types::{ConfigObject, ConfigObjectList, DeleteAck, PageQuery};
use kvconf_store::KeyValueStore;
use std::sync::Arc;
use tracing::debug;

/// The create/read/list/delete operations of kvconf.
///
/// A `ConfigService` is a cheap handle around one shared store. It holds no
/// state of its own and performs no locking: each operation is a single store
/// call (or, for `list`, one unsynchronized page build), and per-key
/// atomicity is whatever the store provides.
///
/// # Example
///
/// ```rust
/// use kvconf_core::{ConfigObject, ConfigService, PageQuery};
/// use kvconf_store::InMemoryStore;
/// use std::sync::Arc;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let service = ConfigService::new(Arc::new(InMemoryStore::new()));
/// service.create(ConfigObject::new("app.name", "kvconf")).await.unwrap();
///
/// let page = service.list(&PageQuery::new()).await.unwrap();
/// assert_eq!(page.items.len(), 1);
/// # });
/// ```
#[derive(Clone)]
pub struct ConfigService {
    store: Arc<dyn KeyValueStore>,
}

impl ConfigService {
    /// Creates a service over `store`.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Returns the underlying store handle.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    /// Writes `object`, overwriting any existing value for its key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidInput`] if the key is empty or the store
    /// does not acknowledge the write.
    ///
    /// An empty value is written as given, but reads treat it as absent.
    pub async fn create(&self, object: ConfigObject) -> CoreResult<ConfigObject> {
        if object.key.is_empty() {
            return Err(ConfigError::invalid_input("key must not be empty"));
        }

        if !self.store.set(&object.key, &object.value).await? {
            return Err(ConfigError::invalid_input("Failed to set value"));
        }

        debug!(key = %object.key, "Stored config object");
        Ok(object)
    }

    /// Reads the object stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if the key is absent or empty.
    pub async fn get(&self, key: &str) -> CoreResult<ConfigObject> {
        match self.store.get(key).await? {
            Some(value) if !value.is_empty() => Ok(ConfigObject::new(key, value)),
            _ => Err(ConfigError::not_found(key)),
        }
    }

    /// Lists one page of objects.
    ///
    /// An empty page is a valid answer; this never returns `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidInput`] if the query fails validation or
    /// carries a cursor the store rejects.
    pub async fn list(&self, query: &PageQuery) -> CoreResult<ConfigObjectList> {
        query.validate()?;
        paginate(self.store.as_ref(), query).await
    }

    /// Removes the object stored under `key`.
    ///
    /// Existence is checked and the key removed in one store call.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if nothing was removed.
    pub async fn delete(&self, key: &str) -> CoreResult<DeleteAck> {
        if !self.store.delete(key).await? {
            return Err(ConfigError::not_found(key));
        }
        debug!(key = %key, "Deleted config object");
        Ok(DeleteAck::deleted())
    }

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns the store's error if it does not answer.
    pub async fn ping(&self) -> CoreResult<()> {
        Ok(self.store.ping().await?)
    }

    /// Closes the underlying store.
    ///
    /// # Errors
    ///
    /// Returns the store's error if it fails to shut down cleanly.
    pub async fn close(&self) -> CoreResult<()> {
        Ok(self.store.close().await?)
    }
}
