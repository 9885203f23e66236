use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};

const SCHEMA_VERSION: &str = "001";
const INITIAL_SCHEMA: &str = include_str!("migrations/001_initial.sql");

/// Bring the schema to [`SCHEMA_VERSION`].
///
/// A `notes` table that predates version tracking is recorded as current
/// and left untouched, rows included.
pub fn run_migrations(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL
        )",
    )
    .context("Failed to create schema_migrations table")?;

    let recorded: Option<String> = conn
        .query_row(
            "SELECT applied_at FROM schema_migrations WHERE version = ?",
            [SCHEMA_VERSION],
            |row| row.get(0),
        )
        .optional()?;
    if recorded.is_some() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    let legacy: i64 = tx.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'notes'",
        [],
        |row| row.get(0),
    )?;

    if legacy > 0 {
        tracing::info!("Adopting existing notes table as schema {}", SCHEMA_VERSION);
    } else {
        tx.execute_batch(INITIAL_SCHEMA)
            .with_context(|| format!("Failed to create schema {}", SCHEMA_VERSION))?;
        tracing::info!("Created notes schema {}", SCHEMA_VERSION);
    }

    tx.execute(
        "INSERT INTO schema_migrations (version, applied_at) VALUES (?, ?)",
        (SCHEMA_VERSION, chrono::Utc::now().to_rfc3339()),
    )?;
    tx.commit()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_names(conn: &Connection) -> Vec<String> {
        let mut stmt = conn.prepare("PRAGMA table_info(notes)").unwrap();
        stmt.query_map([], |row| row.get(1))
            .unwrap()
            .collect::<Result<Vec<String>, _>>()
            .unwrap()
    }

    fn recorded_versions(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare("SELECT version FROM schema_migrations ORDER BY version")
            .unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<Vec<String>, _>>()
            .unwrap()
    }

    #[test]
    fn creates_notes_table_on_fresh_db() {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();

        assert_eq!(
            column_names(&conn),
            vec!["id", "title", "content", "category", "icon", "duedate"]
        );
        assert_eq!(recorded_versions(&conn), vec!["001"]);
    }

    #[test]
    fn running_twice_is_a_no_op() {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();
        run_migrations(&mut conn).unwrap();

        assert_eq!(recorded_versions(&conn), vec!["001"]);
    }

    #[test]
    fn adopts_unversioned_notes_table() {
        let mut conn = Connection::open_in_memory().unwrap();

        // Layout written by the unversioned service: no AUTOINCREMENT, nullable columns
        conn.execute_batch(
            "
            CREATE TABLE notes (
                id INTEGER NOT NULL,
                title VARCHAR,
                content VARCHAR,
                category VARCHAR,
                icon VARCHAR,
                duedate VARCHAR,
                PRIMARY KEY (id)
            );
            CREATE INDEX ix_notes_title ON notes (title);
            INSERT INTO notes (title, content) VALUES ('kept', 'row');
        ",
        )
        .unwrap();

        run_migrations(&mut conn).unwrap();

        assert_eq!(recorded_versions(&conn), vec!["001"]);
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM notes", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
