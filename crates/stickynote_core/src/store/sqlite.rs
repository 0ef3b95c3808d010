//! SQLite-backed durable key-value store.
//!
//! # Responsibility
//! - Persist notes across process restarts in a single-table schema.
//! - Keep schema versioning inside the store boundary.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version` and a store written
//!   by a newer build is rejected, never half-read.
//! - Application data is not touched before the schema check succeeds.

use crate::store::change::{ChangeBus, OriginId, StoreChange};
use crate::store::{KeyValueStore, StoreError, StoreResult};
use log::{error, info};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};
use uuid::Uuid;

const SCHEMA_VERSION: u32 = 1;
const SCHEMA_SQL: &str = "CREATE TABLE notes (
    key  TEXT PRIMARY KEY NOT NULL,
    body TEXT NOT NULL
);";

/// Durable store over one SQLite connection.
///
/// The counterpart of the host's origin-scoped storage: sibling contexts on
/// the same file share a [`ChangeBus`], so a write in one context surfaces
/// as a change notification in the others.
#[derive(Debug)]
pub struct SqliteNoteStore {
    origin: OriginId,
    conn: Connection,
    path: Option<PathBuf>,
    bus: ChangeBus,
}

impl SqliteNoteStore {
    /// Opens (creating if needed) a file-backed store.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = open_connection(&path, "file")?;
        Ok(Self {
            origin: Uuid::new_v4(),
            conn,
            path: Some(path),
            bus: ChangeBus::new(),
        })
    }

    /// Opens a private in-memory store, mainly for tests and probes.
    pub fn open_in_memory() -> StoreResult<Self> {
        let started_at = Instant::now();
        let conn = Connection::open_in_memory()
            .map_err(StoreError::from)
            .and_then(|mut conn| bootstrap(&mut conn).map(|()| conn));
        let conn = log_open_outcome(conn, "memory", started_at)?;
        Ok(Self {
            origin: Uuid::new_v4(),
            conn,
            path: None,
            bus: ChangeBus::new(),
        })
    }

    /// Opens another context over the same file, as another tab would.
    ///
    /// The sibling shares this store's change bus under its own origin.
    /// In-memory stores have no shared backing data to attach to.
    pub fn open_sibling(&self) -> StoreResult<Self> {
        let path = self
            .path
            .as_ref()
            .ok_or(StoreError::Unsupported(
                "in-memory store cannot open a sibling context",
            ))?
            .clone();
        let conn = open_connection(&path, "file")?;
        Ok(Self {
            origin: Uuid::new_v4(),
            conn,
            path: Some(path),
            bus: self.bus.clone(),
        })
    }

    /// Identity of this context on the shared bus.
    pub fn origin(&self) -> OriginId {
        self.origin
    }

    /// Subscribes this context to changes made by its siblings.
    pub fn changes(&self) -> Receiver<StoreChange> {
        self.bus.subscribe(self.origin)
    }
}

impl KeyValueStore for SqliteNoteStore {
    fn enumerate(&self) -> StoreResult<Vec<(String, String)>> {
        let mut stmt = self.conn.prepare("SELECT key, body FROM notes;")?;
        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push((row.get(0)?, row.get(1)?));
        }
        Ok(entries)
    }

    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT body FROM notes WHERE key = ?1;")?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(row.get(0)?));
        }
        Ok(None)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        let previous = self.get(key)?;
        if previous.as_deref() == Some(value) {
            return Ok(());
        }
        self.conn.execute(
            "INSERT INTO notes (key, body) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET body = excluded.body;",
            params![key, value],
        )?;
        self.bus.publish(self.origin, &StoreChange::set(key, value));
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        let removed = self
            .conn
            .execute("DELETE FROM notes WHERE key = ?1;", [key])?;
        if removed > 0 {
            self.bus.publish(self.origin, &StoreChange::removal(key));
        }
        Ok(())
    }
}

fn open_connection(path: &Path, mode: &str) -> StoreResult<Connection> {
    let started_at = Instant::now();
    let conn = Connection::open(path)
        .map_err(StoreError::from)
        .and_then(|mut conn| bootstrap(&mut conn).map(|()| conn));
    log_open_outcome(conn, mode, started_at)
}

fn log_open_outcome(
    conn: StoreResult<Connection>,
    mode: &str,
    started_at: Instant,
) -> StoreResult<Connection> {
    match conn {
        Ok(conn) => {
            info!(
                "event=store_open module=store status=ok mode={mode} duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=store_open module=store status=error mode={mode} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            );
            Err(err)
        }
    }
}

fn bootstrap(conn: &mut Connection) -> StoreResult<()> {
    conn.busy_timeout(Duration::from_secs(5))?;
    let db_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if db_version > SCHEMA_VERSION {
        return Err(StoreError::UnsupportedSchemaVersion {
            db_version,
            latest_supported: SCHEMA_VERSION,
        });
    }
    if db_version < SCHEMA_VERSION {
        let tx = conn.transaction()?;
        tx.execute_batch(SCHEMA_SQL)?;
        tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
        tx.commit()?;
    }
    Ok(())
}
