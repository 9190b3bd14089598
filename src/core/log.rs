use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::table::visible_width;
use ansi_term::Colour;

const OP_TARGET_WIDTH: usize = 60;

fn color_for_operation(op: &str) -> Colour {
    match op {
        "staff_add" => Colour::Green,
        "staff_del" => Colour::Red,
        "staff_edit" => Colour::Yellow,
        "assign" => Colour::Cyan,
        "work_status" => Colour::Blue,
        "import" | "migration_applied" => Colour::Purple,
        "backup" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: i64,
    pub date: String,
    pub operation: String,
    pub target: String,
    pub message: String,
}

pub struct LogLogic;

impl LogLogic {
    /// Audit rows, oldest first. `limit` keeps only the newest n.
    pub fn entries(pool: &DbPool, limit: Option<usize>) -> AppResult<Vec<LogEntry>> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id DESC LIMIT ?1",
        )?;

        let n = limit.map(|l| l as i64).unwrap_or(-1);
        let rows = stmt.query_map([n], |row| {
            Ok(LogEntry {
                id: row.get(0)?,
                date: row.get(1)?,
                operation: row.get(2)?,
                target: row.get(3)?,
                message: row.get(4)?,
            })
        })?;

        let mut entries = Vec::new();
        for r in rows {
            entries.push(r?);
        }
        entries.reverse();
        Ok(entries)
    }

    pub fn print_log(pool: &DbPool, limit: Option<usize>) -> AppResult<()> {
        let entries = Self::entries(pool, limit)?;

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let id_w = entries.iter().map(|e| e.id.to_string().len()).max().unwrap_or(1);
        let dates: Vec<String> = entries
            .iter()
            .map(|e| {
                chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%F %T").to_string())
                    .unwrap_or_else(|_| e.date.clone())
            })
            .collect();
        let date_w = dates.iter().map(|d| d.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for (e, date) in entries.iter().zip(&dates) {
            let color = color_for_operation(&e.operation);

            // only the operation word is coloured; the target is cut to fit
            let plain = if e.target.is_empty() {
                e.operation.clone()
            } else {
                format!("{} ({})", e.operation, e.target)
            };
            let plain = crate::utils::truncate(&plain, OP_TARGET_WIDTH);
            let painted = match plain.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(plain.as_str()).to_string(),
            };
            let padding = " ".repeat(OP_TARGET_WIDTH.saturating_sub(visible_width(&painted)));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id, date, painted, padding, e.message
            );
        }

        Ok(())
    }
}
