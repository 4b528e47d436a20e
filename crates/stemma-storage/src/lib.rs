//! Stemma Storage - persistence backends for the family graph
//!
//! This crate implements the narrow contract the graph core is built
//! against: create-or-replace writes for persons and unions, append-only
//! link inserts, and a bulk load that rebuilds the in-memory tree at
//! startup in a fixed order.

#![allow(clippy::result_large_err)]

pub mod error;
pub mod memory;
pub mod sqlite;
pub mod traits;

pub use error::{StorageError, StorageResult};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::TreeStore;
