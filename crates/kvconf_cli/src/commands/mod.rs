//! CLI command implementations.

pub mod delete;
pub mod get;
pub mod list;
pub mod serve;
pub mod set;
