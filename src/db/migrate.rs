use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. Applied migrations are recorded there,
/// so it has to exist before anything else.
fn ensure_log_table(conn: &Connection) -> Result<()> {
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
    )?;
    Ok(())
}

fn migration_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Ordered list of schema migrations: (version, description, sql).
const MIGRATIONS: &[(&str, &str, &str)] = &[
    (
        "20250601_0001_create_documents",
        "Created documents table",
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            collection  TEXT NOT NULL,
            id          TEXT NOT NULL,
            body        TEXT NOT NULL CHECK(json_valid(body)),
            created_at  TEXT NOT NULL,
            updated_at  TEXT NOT NULL,
            PRIMARY KEY (collection, id)
        );
        "#,
    ),
    (
        "20250612_0002_documents_staff_index",
        "Indexed detections by assigned staff",
        r#"
        CREATE INDEX IF NOT EXISTS idx_documents_staff
            ON documents(collection, json_extract(body, '$.staffId'));
        "#,
    ),
];

/// Public entry point: run all pending migrations.
///
/// Invoked by `db::initialize::init_db()` and `DbPool::open()`.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_log_table(conn)?;

    for (version, message, sql) in MIGRATIONS {
        if migration_applied(conn, version)? {
            continue;
        }

        conn.execute_batch(sql)
            .map_err(|e| AppError::Migration(format!("{version}: {e}")))?;
        mark_applied(conn, version, message)?;

        log::info!("Migration applied: {version}");
        if !is_memory_db(conn) {
            success(format!("Migration applied: {} → {}", version, message));
        }
    }

    Ok(())
}

fn is_memory_db(conn: &Connection) -> bool {
    conn.query_row("PRAGMA database_list;", [], |row| row.get::<_, String>(2))
        .map(|p| p.is_empty())
        .unwrap_or(true)
}
