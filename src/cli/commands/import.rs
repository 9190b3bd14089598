use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::detection::DetectionService;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use serde_json::Value;
use std::fs;

/// Accepts a bare array or `{ "documents": [...] }`.
fn documents(raw: Value) -> AppResult<Vec<Value>> {
    match raw {
        Value::Array(items) => Ok(items),
        Value::Object(mut obj) => match obj.remove("documents") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(AppError::InvalidInput(
                "expected a JSON array or an object with a \"documents\" array".into(),
            )),
        },
        _ => Err(AppError::InvalidInput("expected a JSON array of documents".into())),
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file } = cmd {
        let content = fs::read_to_string(file)?;
        let docs = documents(serde_json::from_str(&content)?)?;

        if docs.is_empty() {
            warning("No documents to import.");
            return Ok(());
        }

        let pool = DbPool::open(&cfg.database)?;
        let tx = pool.conn.unchecked_transaction()?;
        let imported = DetectionService::import(&pool, &docs)?;
        tx.commit()?;

        audit_quiet(
            &pool.conn,
            "import",
            file,
            &format!("Imported {imported} detection documents"),
        );
        success(format!("Imported {imported} detections from {file}"));
    }

    Ok(())
}
