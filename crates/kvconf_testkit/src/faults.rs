//! Fault injection for store-level testing.
//!
//! [`FaultyStore`] wraps an [`InMemoryStore`] and misbehaves on demand, so
//! the races and failure paths a real backing store only shows under load can
//! be reproduced deterministically.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kvconf_testkit::faults::{Fault, FaultyStore};
//!
//! let store = FaultyStore::with_entries([("a", "1")]);
//! store.inject(Fault::VanishAfterScan);
//! // every key a scan returns is deleted before it can be read
//! ```

use async_trait::async_trait;
use kvconf_store::{InMemoryStore, KeyValueStore, ScanPage, StoreError, StoreResult, SCAN_START};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Misbehaviours a [`FaultyStore`] can be told to exhibit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// `set` is answered without an `OK` acknowledgment.
    RejectWrites,
    /// Keys returned by `scan` are deleted before anyone can read them.
    VanishAfterScan,
    /// `scan` ignores the count hint and returns every matching key at once.
    Overshoot,
    /// Every call fails as if the connection were down.
    Unreachable,
}

/// A store that injects faults around an [`InMemoryStore`].
#[derive(Debug, Default)]
pub struct FaultyStore {
    inner: InMemoryStore,
    reject_writes: AtomicBool,
    vanish_after_scan: AtomicBool,
    overshoot: AtomicBool,
    unreachable: AtomicBool,
    scans: AtomicUsize,
}

impl FaultyStore {
    /// Creates an empty store with no faults active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries` and no faults active.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            inner: InMemoryStore::with_entries(entries),
            ..Self::default()
        }
    }

    /// Activates `fault`.
    pub fn inject(&self, fault: Fault) {
        self.flag(fault).store(true, Ordering::SeqCst);
    }

    /// Deactivates `fault`.
    pub fn heal(&self, fault: Fault) {
        self.flag(fault).store(false, Ordering::SeqCst);
    }

    /// Returns the number of `scan` calls made so far.
    #[must_use]
    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::SeqCst)
    }

    /// Returns the wrapped store, bypassing every fault.
    #[must_use]
    pub fn inner(&self) -> &InMemoryStore {
        &self.inner
    }

    fn flag(&self, fault: Fault) -> &AtomicBool {
        match fault {
            Fault::RejectWrites => &self.reject_writes,
            Fault::VanishAfterScan => &self.vanish_after_scan,
            Fault::Overshoot => &self.overshoot,
            Fault::Unreachable => &self.unreachable,
        }
    }

    fn is_active(&self, fault: Fault) -> bool {
        self.flag(fault).load(Ordering::SeqCst)
    }

    fn check_reachable(&self) -> StoreResult<()> {
        if self.is_active(Fault::Unreachable) {
            return Err(StoreError::Connection("Connection refused (injected)".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FaultyStore {
    async fn set(&self, key: &str, value: &str) -> StoreResult<bool> {
        self.check_reachable()?;
        if self.is_active(Fault::RejectWrites) {
            return Ok(false);
        }
        self.inner.set(key, value).await
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.check_reachable()?;
        self.inner.get(key).await
    }

    async fn scan(&self, cursor: &str, pattern: &str, count: usize) -> StoreResult<ScanPage> {
        self.check_reachable()?;
        self.scans.fetch_add(1, Ordering::SeqCst);

        let page = if self.is_active(Fault::Overshoot) {
            let everything = self.inner.len().max(1);
            let mut page = self.inner.scan(SCAN_START, pattern, everything).await?;
            page.cursor = SCAN_START.to_string();
            page
        } else {
            self.inner.scan(cursor, pattern, count).await?
        };

        if self.is_active(Fault::VanishAfterScan) {
            for key in &page.keys {
                self.inner.delete(key).await?;
            }
        }

        Ok(page)
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        self.check_reachable()?;
        self.inner.delete(key).await
    }

    async fn dbsize(&self) -> StoreResult<u64> {
        self.check_reachable()?;
        self.inner.dbsize().await
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check_reachable()?;
        self.inner.ping().await
    }

    async fn close(&self) -> StoreResult<()> {
        self.inner.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_faults_behaves_like_inner() {
        let store = FaultyStore::with_entries([("a", "1")]);
        assert!(store.set("b", "2").await.unwrap());
        assert_eq!(store.dbsize().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn reject_writes_leaves_store_unchanged() {
        let store = FaultyStore::new();
        store.inject(Fault::RejectWrites);
        assert!(!store.set("a", "1").await.unwrap());
        assert!(store.inner().is_empty());

        store.heal(Fault::RejectWrites);
        assert!(store.set("a", "1").await.unwrap());
    }

    #[tokio::test]
    async fn vanish_after_scan_deletes_scanned_keys() {
        let store = FaultyStore::with_entries([("a", "1"), ("b", "2")]);
        store.inject(Fault::VanishAfterScan);

        let page = store.scan(SCAN_START, "a", 10).await.unwrap();
        assert_eq!(page.keys, vec!["a"]);
        assert_eq!(store.get("a").await.unwrap(), None);
        assert_eq!(store.get("b").await.unwrap().as_deref(), Some("2"));
    }

    #[tokio::test]
    async fn overshoot_returns_everything() {
        let store = FaultyStore::with_entries((0..9).map(|i| (format!("k{i}"), "v")));
        store.inject(Fault::Overshoot);

        let page = store.scan(SCAN_START, "*", 2).await.unwrap();
        assert_eq!(page.keys.len(), 9);
        assert!(page.is_complete());
        assert_eq!(store.scan_count(), 1);
    }

    #[tokio::test]
    async fn unreachable_fails_every_call() {
        let store = FaultyStore::with_entries([("a", "1")]);
        store.inject(Fault::Unreachable);

        assert!(matches!(store.get("a").await, Err(StoreError::Connection(_))));
        assert!(matches!(store.ping().await, Err(StoreError::Connection(_))));
        assert!(matches!(store.dbsize().await, Err(StoreError::Connection(_))));
    }
}
