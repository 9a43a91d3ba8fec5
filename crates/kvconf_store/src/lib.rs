//! # kvconf Store
//!
//! Backing key/value store adapters for kvconf.
//!
//! This crate is the lowest layer of kvconf. A store is a **thin call-through**
//! to an external key/value engine: it exposes the engine's SET, GET, SCAN,
//! DEL and DBSIZE primitives and nothing else.
//!
//! ## Design Principles
//!
//! - Stores hold string keys and string values only
//! - Scan cursors are opaque tokens owned by the store
//! - No retries, no caching, no cross-key transactions
//! - Must be `Send + Sync` so one handle serves every request
//!
//! ## Available Stores
//!
//! - [`RedisStore`] - Redis (or any RESP-compatible server) over one multiplexed connection
//! - [`InMemoryStore`] - For testing and local development
//!
//! ## Example
//!
//! ```rust
//! use kvconf_store::{InMemoryStore, KeyValueStore, SCAN_START};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let store = InMemoryStore::new();
//! assert!(store.set("feature.flag", "on").await.unwrap());
//! let page = store.scan(SCAN_START, "feature.*", 10).await.unwrap();
//! assert_eq!(page.keys, vec!["feature.flag".to_string()]);
//! assert!(page.is_complete());
//! # });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod backend;
mod error;
mod memory;
mod pattern;
mod redis_store;

pub use backend::{KeyValueStore, ScanPage, SCAN_START};
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryStore;
pub use pattern::glob_match;
pub use redis_store::RedisStore;
