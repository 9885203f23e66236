mod error;
mod schema;

use std::path::Path;
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{OptionalExtension, Row};

use crate::models::*;

pub use error::{StoreError, StoreResult};

type SqlitePool = Pool<SqliteConnectionManager>;
type SqliteConn = PooledConnection<SqliteConnectionManager>;

const NOTE_COLUMNS: &str = "id, title, content, category, icon, duedate";

const POOL_SIZE: u32 = 8;

/// Handle to the notes database.
///
/// Clones share one connection pool. Every operation checks out its own
/// connection and returns it when the guard drops, on success or error.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) a database file, creating its directory if needed.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let manager = SqliteConnectionManager::file(path).with_init(|c| {
            c.pragma_update(None, "journal_mode", "WAL")?;
            // Concurrent writers wait for the file lock instead of failing at once
            c.pragma_update(None, "busy_timeout", 5000i64)?;
            Ok(())
        });
        let pool = Pool::builder()
            .max_size(POOL_SIZE)
            .connection_timeout(Duration::from_secs(10))
            .build(manager)?;

        tracing::info!("Opened database at {}", path.display());
        Ok(Self { pool })
    }

    /// In-memory database for tests.
    ///
    /// Each SQLite memory connection is a separate database, so the pool
    /// holds exactly one.
    pub fn open_memory() -> StoreResult<Self> {
        let pool = Pool::builder()
            .max_size(1)
            .build(SqliteConnectionManager::memory())?;
        Ok(Self { pool })
    }

    /// Ensure the schema exists. Safe to call on every startup.
    pub fn migrate(&self) -> anyhow::Result<()> {
        let mut conn = self.conn()?;
        schema::run_migrations(&mut conn)
    }

    fn conn(&self) -> StoreResult<SqliteConn> {
        Ok(self.pool.get()?)
    }

    // ============================================================
    // Note operations
    // ============================================================

    pub fn list_notes(&self) -> StoreResult<Vec<Note>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("SELECT {NOTE_COLUMNS} FROM notes ORDER BY id"))?;

        let notes = stmt
            .query_map([], note_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(notes)
    }

    pub fn get_note(&self, id: i64) -> StoreResult<Option<Note>> {
        let conn = self.conn()?;
        let note = conn
            .query_row(
                &format!("SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?"),
                [id],
                note_from_row,
            )
            .optional()?;
        Ok(note)
    }

    pub fn create_note(&self, input: NoteInput) -> StoreResult<Note> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO notes (title, content, category, icon, duedate)
             VALUES (?, ?, ?, ?, ?)",
            (
                &input.title,
                &input.content,
                &input.category,
                &input.icon,
                &input.duedate,
            ),
        )?;

        let id = conn.last_insert_rowid();
        Ok(input.into_note(id))
    }

    /// Overwrite every writable field of a note. Fields left `None` in the
    /// input are cleared, not preserved.
    pub fn update_note(&self, id: i64, input: NoteInput) -> StoreResult<Option<Note>> {
        let conn = self.conn()?;

        let rows = conn.execute(
            "UPDATE notes SET title = ?, content = ?, category = ?, icon = ?, duedate = ?
             WHERE id = ?",
            (
                &input.title,
                &input.content,
                &input.category,
                &input.icon,
                &input.duedate,
                id,
            ),
        )?;

        if rows == 0 {
            return Ok(None);
        }
        Ok(Some(input.into_note(id)))
    }

    pub fn delete_note(&self, id: i64) -> StoreResult<bool> {
        let conn = self.conn()?;
        let rows = conn.execute("DELETE FROM notes WHERE id = ?", [id])?;
        Ok(rows > 0)
    }
}

fn note_from_row(row: &Row<'_>) -> rusqlite::Result<Note> {
    Ok(Note {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        category: row.get(3)?,
        icon: row.get(4)?,
        duedate: row.get(5)?,
    })
}
