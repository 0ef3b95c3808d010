//! Persistent key-value store contracts and implementations.
//!
//! # Responsibility
//! - Define the four-operation store contract the board is written against.
//! - Provide an in-memory implementation (tests, multi-context simulation)
//!   and a SQLite-backed durable implementation.
//! - Publish change notifications to sibling contexts with no echo.
//!
//! # Invariants
//! - The store is the source of truth; it never interprets note text.
//! - A change notification is published only when stored state actually
//!   changed, and never delivered back to the originating context.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod change;
pub mod memory;
pub mod sqlite;

pub use change::{ChangeBus, OriginId, StoreChange};
pub use memory::MemoryNoteStore;
pub use sqlite::SqliteNoteStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store-layer fault taxonomy.
///
/// Faults propagate to the caller uncaught; the core has no retry or
/// rollback policy of its own.
#[derive(Debug)]
pub enum StoreError {
    /// Underlying SQLite failure (I/O, quota, corruption).
    Sqlite(rusqlite::Error),
    /// Durable store was written by a newer build.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Shared in-memory state was poisoned by a panicking writer.
    Poisoned(&'static str),
    /// Operation is not available for this store configuration.
    Unsupported(&'static str),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "store schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Poisoned(what) => write!(f, "shared store state poisoned: {what}"),
            Self::Unsupported(what) => write!(f, "unsupported store operation: {what}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Contract between the board and any persistent key-value store.
///
/// Injected explicitly at construction so the board can run against the
/// in-memory fake and the durable store interchangeably.
pub trait KeyValueStore {
    /// Returns every stored `(key, value)` pair. Order is store-defined and
    /// not contractually meaningful.
    fn enumerate(&self) -> StoreResult<Vec<(String, String)>>;

    /// Returns the value stored under `key`, or `None` when absent.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Stores `value` under `key`, overwriting any previous value.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes `key`. Removing an absent key is a successful no-op.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}
