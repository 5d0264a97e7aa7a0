//! Key-value persistence backends.
//!
//! # Responsibility
//! - Define the string-keyed blob storage contract used by the record store.
//! - Provide in-memory and SQLite-backed implementations.
//!
//! # Invariants
//! - `get` on a missing key returns `Ok(None)`, never an error.
//! - `set` fully replaces the previous value for that key.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use sqlite::SqliteKeyValueStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Transport-level failure of a key-value backend.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    /// Backend connection lacks the expected schema object.
    MissingRequiredTable(&'static str),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "storage table `{table}` is missing")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String-keyed blob storage.
pub trait KeyValueStore {
    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    /// Writes `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    /// Removes `key`. Missing keys are not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }
}
