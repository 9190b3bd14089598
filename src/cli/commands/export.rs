use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::export::logic::ExportRequest;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        report,
        format,
        file,
        range,
        force,
    } = cmd
    {
        let pool = DbPool::open(&cfg.database)?;
        let req = ExportRequest {
            report: *report,
            format: *format,
            file,
            range: range.as_deref(),
            force: *force,
        };
        ExportLogic::export(&pool, cfg, &req)?;
    }
    Ok(())
}
