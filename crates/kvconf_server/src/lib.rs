//! # kvconf Server
//!
//! HTTP surface of the kvconf configuration service.
//!
//! This crate provides:
//! - CRUD endpoints under `/config`
//! - Error classification into `404`/`400`/`500` with a `{ reason }` body
//! - `Accept: text/plain` negotiation for single-object reads
//! - Liveness and readiness probes
//! - Static asset serving for the dashboard bundle
//!
//! # Endpoints
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | `POST` | `/config` | `{ key, value }` |
//! | `GET` | `/config?match=&offset=&limit=` | `{ offset, limit, total, items }` |
//! | `GET` | `/config/{key}` | `{ key, value }` with `Cache-Control` |
//! | `DELETE` | `/config/{key}` | `{ message: "Deleted" }` |
//! | `GET` | `/api` | greeting |
//! | `GET` | `/livez`, `/readyz` | probes |
//!
//! # Lifecycle
//!
//! The backing store is connected once, handed to [`ConfigServer::new`] and
//! shared by every request. [`ConfigServer::run`] closes it after graceful
//! shutdown has drained in-flight requests.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod config;
mod error;
mod handler;
mod negotiate;
mod server;

pub use config::{ServerConfig, DEFAULT_MAX_BODY_BYTES, DEFAULT_TITLE};
pub use error::{ApiError, ServerError, ServerResult};
pub use handler::{AppState, ReadyzResponse};
pub use negotiate::Format;
pub use server::{build_app, shutdown_signal, ConfigServer};
