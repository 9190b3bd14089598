use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) DOCUMENTS PER COLLECTION
    //
    let mut stmt = pool.conn.prepare(
        "SELECT collection, COUNT(*) FROM documents GROUP BY collection ORDER BY collection",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
    })?;

    println!("{}• Collections:{}", CYAN, RESET);
    let mut any = false;
    for r in rows {
        let (collection, count) = r?;
        println!("    {:<16} {}{}{}", collection, GREEN, count, RESET);
        any = true;
    }
    if !any {
        println!("    {GREY}--{RESET}");
    }

    //
    // 3) WRITE RANGE
    //
    let range: Option<(Option<String>, Option<String>)> = pool
        .conn
        .query_row(
            "SELECT MIN(created_at), MAX(updated_at) FROM documents",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let (first, last) = range.unwrap_or((None, None));
    let dash = || format!("{GREY}--{RESET}");

    println!("{}• Activity:{}", CYAN, RESET);
    println!("    first write: {}", first.unwrap_or_else(dash));
    println!("    last write:  {}", last.unwrap_or_else(dash));

    //
    // 4) AUDIT LOG SIZE
    //
    let log_rows: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM log", [], |row| row.get(0))?;
    println!("{}• Audit log entries:{} {}", CYAN, RESET, log_rows);

    println!();
    Ok(())
}
