//! Key/value store trait definition.

use crate::error::StoreResult;
use async_trait::async_trait;

/// Cursor token that starts a scan and, when returned, ends it.
pub const SCAN_START: &str = "0";

/// One batch returned by [`KeyValueStore::scan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPage {
    /// Cursor to pass to the next `scan` call, verbatim.
    pub cursor: String,
    /// Keys found in this batch.
    pub keys: Vec<String>,
}

impl ScanPage {
    /// Returns true if the store reported the end of the iteration.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cursor == SCAN_START
    }
}

/// A backing key/value engine.
///
/// Stores are **thin call-throughs**. Each method maps to exactly one
/// primitive of the underlying engine and surfaces its failure once, without
/// retrying.
///
/// # Invariants
///
/// - `set` overwrites any existing value for the key
/// - `delete` reports whether a key was actually removed, atomically
/// - `scan` cursors are opaque; callers pass them back verbatim and never
///   interpret them beyond comparing with [`SCAN_START`]
/// - A full scan started at [`SCAN_START`] and followed until the store
///   returns [`SCAN_START`] again visits every key that existed for the whole
///   iteration at least once
///
/// # Implementors
///
/// - [`super::RedisStore`] - For production
/// - [`super::InMemoryStore`] - For testing
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Writes `value` under `key`.
    ///
    /// Returns `true` if the engine acknowledged the write.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot be reached or rejects the command.
    async fn set(&self, key: &str, value: &str) -> StoreResult<bool>;

    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot be reached.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Runs one step of a cursor-based scan over keys matching `pattern`.
    ///
    /// `count` is a hint. The engine may return more or fewer keys.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The cursor is not one this store issued
    /// - The engine cannot be reached
    async fn scan(&self, cursor: &str, pattern: &str, count: usize) -> StoreResult<ScanPage>;

    /// Removes `key`.
    ///
    /// Returns `true` if the key existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot be reached.
    async fn delete(&self, key: &str) -> StoreResult<bool>;

    /// Returns the number of keys in the whole key space.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot be reached.
    async fn dbsize(&self) -> StoreResult<u64>;

    /// Checks that the engine is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine does not answer.
    async fn ping(&self) -> StoreResult<()>;

    /// Releases the store. Calls made after `close` may fail.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails to shut down cleanly.
    async fn close(&self) -> StoreResult<()> {
        Ok(())
    }
}
