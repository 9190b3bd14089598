use crate::db::migrate::run_pending_migrations;
use crate::errors::AppResult;
use rusqlite::Connection;

/// Prepare a fresh or existing database file: WAL journal (dashboard loads
/// read while commands write), then every pending migration.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    let mode: String = conn.query_row("PRAGMA journal_mode = WAL;", [], |row| row.get(0))?;
    log::debug!("journal mode: {mode}");

    run_pending_migrations(conn)
}
