//! # kvconf Testkit
//!
//! Test utilities for kvconf.
//!
//! This crate provides:
//! - Seeded stores and an in-process HTTP test server
//! - Fault-injecting stores for race and failure scenarios
//! - Property-based test generators using proptest
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kvconf_testkit::prelude::*;
//!
//! #[tokio::test]
//! async fn lists_over_http() {
//!     let server = TestServer::start_with_store(seeded_store("app", 30)).await;
//!     // ... point a client at server.url()
//!     server.shutdown().await.unwrap();
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod faults;
pub mod fixtures;
pub mod generators;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::faults::*;
    pub use crate::fixtures::*;
    pub use crate::generators::*;
}

pub use faults::*;
pub use fixtures::*;
pub use generators::*;
