use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, params};

type MigrationFn = fn(&Connection) -> rusqlite::Result<()>;

/// Ordered list of schema migrations. Versions are never renamed or reordered:
/// the `log` table remembers which ones already ran.
const MIGRATIONS: &[(&str, MigrationFn)] = &[
    ("20260901_0001_create_preferences", create_preferences_table),
    ("20260901_0002_create_reminders", create_reminders_table),
    ("20260915_0003_index_due_reminders", index_due_reminders),
];

/// Ensure that the `log` table exists. It doubles as the migration ledger.
fn ensure_log_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )
}

/// Key-value preference store: one JSON document per key.
fn create_preferences_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS preferences (
            key        TEXT PRIMARY KEY,
            value      TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
}

/// One pending wake-up per visitor; rescheduling replaces the row.
fn create_reminders_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS reminders (
            visitor_id TEXT PRIMARY KEY,
            name       TEXT NOT NULL,
            departure  TEXT NOT NULL,   -- HH:MM
            fire_at    TEXT NOT NULL,   -- YYYY-MM-DDTHH:MM:SS, local wall clock
            fired      INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );
        "#,
    )
}

fn index_due_reminders(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_reminders_due ON reminders(fired, fire_at);",
    )
}

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare_cached(
        "SELECT 1 FROM log WHERE operation = 'migration_applied' AND target = ?1 LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Run every migration not yet recorded in `log`, each inside its own
/// transaction together with its ledger entry.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    for (version, migration) in MIGRATIONS {
        if is_applied(conn, version)? {
            continue;
        }

        conn.execute_batch("BEGIN IMMEDIATE TRANSACTION")?;

        let outcome = migration(conn).and_then(|_| {
            conn.execute(
                "INSERT INTO log (date, operation, target, message) VALUES (?1, 'migration_applied', ?2, ?3)",
                params![Local::now().to_rfc3339(), version, "schema migration applied"],
            )
        });

        match outcome {
            Ok(_) => {
                conn.execute_batch("COMMIT")?;
                success(format!("Migration applied: {}", version));
            }
            Err(e) => {
                let _ = conn.execute_batch("ROLLBACK");
                return Err(AppError::Migration(format!("{}: {}", version, e)));
            }
        }
    }

    Ok(())
}

/// Versions recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare_cached(
        "SELECT target FROM log WHERE operation = 'migration_applied' ORDER BY id ASC",
    )?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}
