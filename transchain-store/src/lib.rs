#![forbid(unsafe_code)]

//! Persistent translation storage for transchain: row stores and the
//! database backend, plus [`build_chain`] for config-driven setup.

pub mod builder;
pub mod database;
pub mod error;
pub mod redb_store;
pub mod row_store;

pub use builder::build_chain;
pub use database::DatabaseBackend;
pub use error::StoreError;
pub use redb_store::RedbRowStore;
pub use row_store::{MemoryRowStore, RowStore};
