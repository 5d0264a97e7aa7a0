//! SQLite-backed key-value store.
//!
//! # Responsibility
//! - Persist blobs in the `kv_entries` table of a migrated connection.
//!
//! # Invariants
//! - Only connections at the latest schema version are accepted.
//! - Writes are single-statement upserts, so a failed write leaves the old
//!   value intact.

use super::{KeyValueStore, StorageError, StorageResult};
use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};

const KV_TABLE: &str = "kv_entries";

/// Key-value store over a borrowed, migrated SQLite connection.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    ///
    /// # Errors
    /// - `DbError::UninitializedConnection` when migrations were not applied.
    /// - `StorageError::MissingRequiredTable` when `kv_entries` is absent.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_version(conn)?;
        if actual_version != expected_version {
            return Err(DbError::UninitializedConnection {
                expected_version,
                actual_version,
            }
            .into());
        }

        if !table_exists(conn, KV_TABLE)? {
            return Err(StorageError::MissingRequiredTable(KV_TABLE));
        }

        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE key = ?1;", [key])?;
        Ok(())
    }
}

fn table_exists(conn: &Connection, table: &str) -> StorageResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
