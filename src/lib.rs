//! Bookyard - book catalog reporting service
//!
//! A catalog of books, authors, publishers, stores, and reviews backed by
//! SQLite, with a set of aggregate report queries (mean review ratings,
//! per-store inventory counts) exposed over a small read-only HTTP API.
//!
//! Module layout:
//! - [`storage`] - database handle, schema migrations, entity models, inserts
//! - [`reports`] - the parametrized aggregate report queries
//! - [`server`] - axum router and handlers
//! - [`error`] - crate error type

pub mod error;
pub mod reports;
pub mod server;
pub mod storage;

pub use error::{CatalogError, Result};
pub use storage::Database;
