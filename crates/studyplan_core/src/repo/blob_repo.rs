//! Blob store contract with SQLite and in-memory implementations.
//!
//! # Invariants
//! - `put_blob` replaces any previous value under the same key.
//! - `delete_blob` on an absent key reports `false` and changes nothing.

use crate::db::migrations::{current_version, latest_version};
use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BlobResult<T> = Result<T, BlobError>;

/// Blob storage failure.
#[derive(Debug)]
pub enum BlobError {
    Db(DbError),
    /// The connection has not been migrated to the schema this build expects.
    SchemaNotReady { found: u32, expected: u32 },
    /// Keys must be non-blank.
    InvalidKey(String),
    /// Backend refused the operation (e.g. storage unavailable).
    Unavailable(String),
}

impl Display for BlobError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::SchemaNotReady { found, expected } => write!(
                f,
                "blob store schema version {found} does not match expected {expected}"
            ),
            Self::InvalidKey(key) => write!(f, "invalid blob key `{key}`"),
            Self::Unavailable(message) => write!(f, "blob storage unavailable: {message}"),
        }
    }
}

impl Error for BlobError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for BlobError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for BlobError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Durable key-value storage for serialized collections.
pub trait BlobStore {
    fn get_blob(&self, key: &str) -> BlobResult<Option<String>>;
    fn put_blob(&self, key: &str, value: &str) -> BlobResult<()>;
    fn delete_blob(&self, key: &str) -> BlobResult<bool>;
}

impl<T: BlobStore + ?Sized> BlobStore for &T {
    fn get_blob(&self, key: &str) -> BlobResult<Option<String>> {
        (**self).get_blob(key)
    }

    fn put_blob(&self, key: &str, value: &str) -> BlobResult<()> {
        (**self).put_blob(key, value)
    }

    fn delete_blob(&self, key: &str) -> BlobResult<bool> {
        (**self).delete_blob(key)
    }
}

/// SQLite-backed blob store over the `kv_blobs` table.
pub struct SqliteBlobStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBlobStore<'conn> {
    /// Wraps a migrated connection.
    ///
    /// # Errors
    /// - `SchemaNotReady` when the connection was not opened through
    ///   `open_db`/`open_db_in_memory`.
    pub fn try_new(conn: &'conn Connection) -> BlobResult<Self> {
        let found = current_version(conn)?;
        let expected = latest_version();
        if found != expected {
            return Err(BlobError::SchemaNotReady { found, expected });
        }
        Ok(Self { conn })
    }
}

impl BlobStore for SqliteBlobStore<'_> {
    fn get_blob(&self, key: &str) -> BlobResult<Option<String>> {
        let key = normalize_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_blobs WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put_blob(&self, key: &str, value: &str) -> BlobResult<()> {
        let key = normalize_key(key)?;
        self.conn.execute(
            "INSERT INTO kv_blobs (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn delete_blob(&self, key: &str) -> BlobResult<bool> {
        let key = normalize_key(key)?;
        let changed = self
            .conn
            .execute("DELETE FROM kv_blobs WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }
}

/// Process-local blob store.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get_blob(&self, key: &str) -> BlobResult<Option<String>> {
        let key = normalize_key(key)?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn put_blob(&self, key: &str, value: &str) -> BlobResult<()> {
        let key = normalize_key(key)?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete_blob(&self, key: &str) -> BlobResult<bool> {
        let key = normalize_key(key)?;
        Ok(self.entries.borrow_mut().remove(key).is_some())
    }
}

fn normalize_key(key: &str) -> BlobResult<&str> {
    if key.trim().is_empty() {
        return Err(BlobError::InvalidKey(key.to_string()));
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::{BlobError, BlobStore, MemoryBlobStore};

    #[test]
    fn memory_store_replaces_and_deletes() {
        let store = MemoryBlobStore::new();
        assert_eq!(store.get_blob("k").unwrap(), None);

        store.put_blob("k", "[1]").unwrap();
        store.put_blob("k", "[2]").unwrap();
        assert_eq!(store.get_blob("k").unwrap().as_deref(), Some("[2]"));
        assert_eq!(store.len(), 1);

        assert!(store.delete_blob("k").unwrap());
        assert!(!store.delete_blob("k").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn blank_keys_are_rejected() {
        let store = MemoryBlobStore::new();
        let err = store.put_blob("  ", "x").unwrap_err();
        assert!(matches!(err, BlobError::InvalidKey(_)));
    }
}
