//! Local planet cache.
//!
//! A pure read-through cache: it is populated only from successful network
//! reads and never reconciled against the server.
//! - Deduplicates by exact name; saving a known name is a no-op
//! - Never persists empty names
//! - Existence checks degrade to `false` on read errors

mod error;
mod sqlite;
mod traits;

pub use error::{StorageError, StorageResult};
pub use sqlite::SqliteStorage;
pub use traits::{NoopStorage, PlanetStorage};
