//! # kvconf Core
//!
//! Configuration objects, cursor pagination and the error taxonomy shared by
//! every kvconf transport.
//!
//! ## Data Model
//!
//! - [`ConfigObject`] - a `{ key, value }` string pair; the key is its identity
//! - [`PageQuery`] - `{ match, offset, limit }` request for one page
//! - [`ConfigObjectList`] - `{ offset, limit, total, items }` page of results
//!
//! ## Pagination
//!
//! Listing is keyset pagination over the backing store's cursor scan. The
//! `offset` of a page is the store's opaque cursor, never a row number: pass
//! it back verbatim to get the next page, and stop when it comes back as
//! `"0"`. See [`paginate`].
//!
//! ## Errors
//!
//! Every failure is one of three [`ErrorKind`]s: `NotFound`, `InvalidInput`
//! or `Unclassified`. Transports map the kind, not the message, to their own
//! status codes.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod error;
mod pagination;
mod service;
mod types;

pub use error::{ConfigError, CoreResult, ErrorKind};
pub use pagination::paginate;
pub use service::ConfigService;
pub use types::{
    ConfigObject, ConfigObjectList, Cursor, DeleteAck, ErrorReply, PageQuery, DEFAULT_LIMIT,
    DEFAULT_MATCH, MAX_LIMIT, MIN_LIMIT,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
