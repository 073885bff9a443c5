//! Key-value store contract and its SQLite and in-memory implementations.
//!
//! # Invariants
//! - Exactly three logical keys exist; see `StoreKey`.
//! - A blob is opaque text to the store; encoding belongs to the caller.
//! - `save` is an upsert: the last writer wins, no locking across processes.

use crate::db::DbError;
use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Logical keys of the persisted state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Tasks,
    Resources,
    DarkMode,
}

impl StoreKey {
    pub const ALL: [StoreKey; 3] = [Self::Tasks, Self::Resources, Self::DarkMode];

    /// Key name as written to the store.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Resources => "resources",
            Self::DarkMode => "darkMode",
        }
    }
}

impl Display for StoreKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure to persist a blob.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Encode {
        key: StoreKey,
        source: serde_json::Error,
    },
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode { key, .. } => write!(f, "cannot encode `{key}`"),
            Self::Unavailable(reason) => write!(f, "store unavailable: {reason}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => err.source(),
            Self::Encode { source, .. } => Some(source),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Persistent text store keyed by `StoreKey`.
pub trait KeyValueStore {
    /// Returns the saved blob, or `None` if never set or unreadable.
    fn load(&self, key: StoreKey) -> Option<String>;
    /// Replaces the blob for `key`.
    fn save(&self, key: StoreKey, blob: &str) -> StoreResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn load(&self, key: StoreKey) -> Option<String> {
        (**self).load(key)
    }

    fn save(&self, key: StoreKey, blob: &str) -> StoreResult<()> {
        (**self).save(key, blob)
    }
}

/// SQLite-backed store over the `kv_entries` table.
pub struct SqliteKeyValueStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKeyValueStore<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl KeyValueStore for SqliteKeyValueStore<'_> {
    fn load(&self, key: StoreKey) -> Option<String> {
        let result = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional();

        match result {
            Ok(value) => {
                debug!(
                    "event=store_load module=repo status=ok key={key} found={}",
                    value.is_some()
                );
                value
            }
            Err(err) => {
                warn!(
                    "event=store_load module=repo status=error key={key} error_code=store_read_failed error={err}"
                );
                None
            }
        }
    }

    fn save(&self, key: StoreKey, blob: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key.as_str(), blob],
        )?;
        debug!(
            "event=store_save module=repo status=ok key={key} bytes={}",
            blob.len()
        );
        Ok(())
    }
}

/// Process-local store; contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RefCell<HashMap<StoreKey, String>>,
    detached: Option<String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stand-in for a durable store that could not be opened.
    ///
    /// Blobs stay readable for the life of the value, but every `save`
    /// reports `StoreError::Unavailable(reason)` so callers know nothing
    /// outlives the process.
    pub fn detached(reason: impl Into<String>) -> Self {
        Self {
            entries: RefCell::default(),
            detached: Some(reason.into()),
        }
    }

    /// Seeds a blob without going through `save`.
    pub fn with_entry(self, key: StoreKey, blob: impl Into<String>) -> Self {
        self.entries.borrow_mut().insert(key, blob.into());
        self
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn load(&self, key: StoreKey) -> Option<String> {
        self.entries.borrow().get(&key).cloned()
    }

    fn save(&self, key: StoreKey, blob: &str) -> StoreResult<()> {
        self.entries.borrow_mut().insert(key, blob.to_string());
        match &self.detached {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StoreError, StoreKey};
    use crate::db::open_db_in_memory;

    #[test]
    fn key_names_match_persisted_layout() {
        let names = StoreKey::ALL.map(StoreKey::as_str);
        assert_eq!(names, ["tasks", "resources", "darkMode"]);
    }

    #[test]
    fn sqlite_store_upserts_and_loads() {
        let conn = open_db_in_memory().expect("open in-memory db");
        let store = SqliteKeyValueStore::new(&conn);

        assert_eq!(store.load(StoreKey::DarkMode), None);
        store.save(StoreKey::DarkMode, "false").expect("first save");
        store.save(StoreKey::DarkMode, "true").expect("second save");
        assert_eq!(store.load(StoreKey::DarkMode).as_deref(), Some("true"));

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
            .expect("count rows");
        assert_eq!(rows, 1);
    }

    #[test]
    fn sqlite_store_reports_read_failure_as_absent() {
        let conn = open_db_in_memory().expect("open in-memory db");
        conn.execute_batch("DROP TABLE kv_entries;")
            .expect("drop table");
        let store = SqliteKeyValueStore::new(&conn);

        assert_eq!(store.load(StoreKey::Tasks), None);
        assert!(store.save(StoreKey::Tasks, "[]").is_err());
    }

    #[test]
    fn memory_store_keeps_keys_independent() {
        let store = MemoryKeyValueStore::new().with_entry(StoreKey::Tasks, "[]");
        store.save(StoreKey::Resources, "[1]").expect("save");
        assert_eq!(store.load(StoreKey::Tasks).as_deref(), Some("[]"));
        assert_eq!(store.load(StoreKey::Resources).as_deref(), Some("[1]"));
        assert_eq!(store.load(StoreKey::DarkMode), None);
    }

    #[test]
    fn detached_store_keeps_blobs_but_reports_every_save() {
        let store = MemoryKeyValueStore::detached("disk missing");
        let err = store
            .save(StoreKey::DarkMode, "true")
            .expect_err("detached saves must fail");
        assert!(matches!(&err, StoreError::Unavailable(reason) if reason == "disk missing"));
        assert_eq!(err.to_string(), "store unavailable: disk missing");
        assert_eq!(store.load(StoreKey::DarkMode).as_deref(), Some("true"));
    }
}
