use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::assignment::AssignmentService;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Assign { detection, staff } = cmd {
        let pool = DbPool::open(&cfg.database)?;

        AssignmentService::assign(&pool, detection, staff)?;
        audit_quiet(
            &pool.conn,
            "assign",
            detection,
            &format!("Assigned to staff {staff}"),
        );
        success(format!("Detection {detection} assigned to {staff} (pending)."));
    }

    Ok(())
}
