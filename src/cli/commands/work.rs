use crate::cli::parser::WorkCommand;
use crate::config::Config;
use crate::core::assignment::AssignmentService;
use crate::core::staff::StaffService;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::AssignedWork;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{color_for_work_status, paint};
use crate::utils::date::{parse_timestamp, time_ago};
use crate::utils::table::Table;
use crate::utils::{format_percent, truncate};
use chrono::Utc;

fn print_work(work: &[AssignedWork]) {
    let now = Utc::now();
    let mut table = Table::new(&["DETECTION", "ASSIGNED", "ADDRESS", "CONFIDENCE", "STATUS"]);

    for w in work {
        let when = parse_timestamp(&w.assigned_at)
            .map(|t| time_ago(t, now))
            .unwrap_or_else(|| w.assigned_at.clone());
        table.add_row(vec![
            w.detection_id.clone(),
            when,
            truncate(&w.address, 48),
            format_percent(w.confidence_score),
            paint(color_for_work_status(w.status), w.status.as_str()),
        ]);
    }

    print!("{}", table.render());
}

pub fn handle(cmd: &WorkCommand, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::open(&cfg.database)?;

    match cmd {
        WorkCommand::List { staff } => {
            let member = StaffService::get(&pool, staff, cfg.default_rating)?;
            let work = AssignmentService::assigned_work_for_staff(&pool, staff)?;

            if work.is_empty() {
                info(format!("No work assigned to {}.", member.name));
                return Ok(());
            }

            header(format!("Work assigned to {}", member.name));
            print_work(&work);
        }

        WorkCommand::Status { detection, status } => {
            AssignmentService::update_work_status(&pool, detection, *status)?;
            audit_quiet(
                &pool.conn,
                "work_status",
                detection,
                &format!("Status set to {status}"),
            );
            success(format!("Detection {detection} is now {status}."));
        }

        WorkCommand::Recent { hours } => {
            let hours = hours.unwrap_or(cfg.recent_hours);
            let work = AssignmentService::recent_assignments(&pool, hours)?;

            if work.is_empty() {
                info(format!("No assignments in the last {hours} h."));
                return Ok(());
            }

            header(format!("Assignments in the last {hours} h"));
            print_work(&work);
        }
    }

    Ok(())
}
