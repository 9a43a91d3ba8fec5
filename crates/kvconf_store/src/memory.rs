//! In-memory store for testing and local development.

use crate::backend::{KeyValueStore, ScanPage, SCAN_START};
use crate::error::{StoreError, StoreResult};
use crate::pattern::glob_match;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicBool, Ordering};

/// Prefix of every cursor issued by [`InMemoryStore`] other than [`SCAN_START`].
const CURSOR_PREFIX: char = 'k';

/// An in-memory key/value store.
///
/// Keys are kept in sorted order. `scan` follows the Redis contract: each
/// call examines up to `count` keys, applies the match pattern to the
/// examined keys only, and may therefore return fewer matches than `count`.
///
/// Cursors name the last key examined, so a scan survives concurrent inserts
/// and deletes: keys present for the whole iteration are returned exactly
/// once.
///
/// # Thread Safety
///
/// This store is thread-safe and can be shared across tasks. No lock is held
/// across an `.await`.
///
/// # Example
///
/// ```rust
/// use kvconf_store::{InMemoryStore, KeyValueStore};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let store = InMemoryStore::with_entries([("a", "1"), ("b", "2")]);
/// assert_eq!(store.dbsize().await.unwrap(), 2);
/// assert_eq!(store.get("a").await.unwrap().as_deref(), Some("1"));
/// # });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<BTreeMap<String, String>>,
    closed: AtomicBool,
}

impl InMemoryStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let data = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            data: RwLock::new(data),
            closed: AtomicBool::new(false),
        }
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Returns true if the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    fn ensure_open(&self) -> StoreResult<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StoreError::Closed);
        }
        Ok(())
    }
}

fn encode_cursor(last_key: &str) -> String {
    let mut cursor = String::with_capacity(1 + last_key.len() * 2);
    cursor.push(CURSOR_PREFIX);
    for byte in last_key.bytes() {
        cursor.push_str(&format!("{byte:02x}"));
    }
    cursor
}

fn decode_cursor(cursor: &str) -> StoreResult<String> {
    let invalid = || StoreError::InvalidCursor(cursor.to_string());

    let hex = cursor.strip_prefix(CURSOR_PREFIX).ok_or_else(invalid)?;
    if hex.len() % 2 != 0 {
        return Err(invalid());
    }
    let bytes = (0..hex.len())
        .step_by(2)
        .map(|i| {
            hex.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
        })
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(invalid)?;
    String::from_utf8(bytes).map_err(|_| invalid())
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn set(&self, key: &str, value: &str) -> StoreResult<bool> {
        self.ensure_open()?;
        self.data.write().insert(key.to_string(), value.to_string());
        Ok(true)
    }

    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        self.ensure_open()?;
        Ok(self.data.read().get(key).cloned())
    }

    async fn scan(&self, cursor: &str, pattern: &str, count: usize) -> StoreResult<ScanPage> {
        self.ensure_open()?;

        let lower = if cursor == SCAN_START {
            Bound::Unbounded
        } else {
            Bound::Excluded(decode_cursor(cursor)?)
        };

        let data = self.data.read();
        let mut examined = data.range::<String, _>((lower, Bound::Unbounded));

        let mut keys = Vec::new();
        let mut last = None;
        for (key, _) in examined.by_ref().take(count.max(1)) {
            if glob_match(pattern, key) {
                keys.push(key.clone());
            }
            last = Some(key);
        }

        let cursor = match last {
            Some(last) if examined.next().is_some() => encode_cursor(last),
            _ => SCAN_START.to_string(),
        };

        Ok(ScanPage { cursor, keys })
    }

    async fn delete(&self, key: &str) -> StoreResult<bool> {
        self.ensure_open()?;
        Ok(self.data.write().remove(key).is_some())
    }

    async fn dbsize(&self) -> StoreResult<u64> {
        self.ensure_open()?;
        Ok(self.data.read().len() as u64)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.ensure_open()
    }

    async fn close(&self) -> StoreResult<()> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }
}
