//! Key-value byte-store abstraction backing note snapshots.
//!
//! # Responsibility
//! - Define the minimal `get`/`put` contract the note store persists through.
//! - Provide in-memory and SQLite implementations.
//!
//! # Invariants
//! - `put` replaces the whole value for a key in a single call; readers never
//!   observe a partially written value.
//! - Implementations report failures instead of dropping writes.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryKvStore;
pub use sqlite::SqliteKvStore;

pub type KvResult<T> = Result<T, KvError>;

/// Failure raised by a key-value backend.
#[derive(Debug)]
pub enum KvError {
    /// SQLite transport or schema failure.
    Db(DbError),
    /// Connection is not bootstrapped with the required table.
    MissingRequiredTable(&'static str),
    /// Backend refused the operation (quota, read-only media, injected fault).
    Rejected(String),
}

impl Display for KvError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "storage is missing required table `{table}`")
            }
            Self::Rejected(reason) => write!(f, "storage rejected operation: {reason}"),
        }
    }
}

impl Error for KvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MissingRequiredTable(_) | Self::Rejected(_) => None,
        }
    }
}

impl From<DbError> for KvError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for KvError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistent byte-store keyed by name.
pub trait KvStore {
    /// Returns the stored bytes for `key`, or `None` when never written.
    fn get(&self, key: &str) -> KvResult<Option<Vec<u8>>>;
    /// Replaces the value stored under `key`.
    fn put(&mut self, key: &str, value: &[u8]) -> KvResult<()>;
}

impl<K: KvStore + ?Sized> KvStore for Box<K> {
    fn get(&self, key: &str) -> KvResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: &[u8]) -> KvResult<()> {
        (**self).put(key, value)
    }
}
