use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::dashboard::{DashboardLogic, DashboardSnapshot};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{BLUE, CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::date::{parse_timestamp, time_ago};
use crate::utils::format_percent;
use crate::utils::table::Table;

pub(crate) fn render(s: &DashboardSnapshot) {
    header(format!(
        "Dashboard · updated {}",
        s.last_updated.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    println!(
        "{CYAN}Detections{RESET}   {}   avg confidence {}",
        s.detections.total,
        format_percent(s.detections.average_confidence)
    );
    println!(
        "{CYAN}Assignments{RESET}  {}   {YELLOW}pending {}{RESET}  {BLUE}in progress {}{RESET}  {GREEN}completed {}{RESET}  {GREY}cancelled {}{RESET}",
        s.assignments.total_assignments,
        s.assignments.pending_assignments,
        s.assignments.in_progress_assignments,
        s.assignments.completed_assignments,
        s.assignments.cancelled_assignments,
    );
    println!(
        "{CYAN}Unassigned{RESET}   {}",
        s.assignments.unassigned_detections
    );
    println!(
        "{CYAN}Staff{RESET}        {}   active {}  on leave {}  inactive {}  avg rating {:.1}",
        s.staff.total, s.staff.active, s.staff.on_leave, s.staff.inactive, s.staff.average_rating
    );

    if !s.top_areas.is_empty() {
        println!("\nTop areas");
        let mut t = Table::new(&["AREA", "DETECTIONS", "AVG CONFIDENCE"]);
        for a in &s.top_areas {
            t.add_row(vec![
                a.area.clone(),
                a.count.to_string(),
                format_percent(a.average_confidence),
            ]);
        }
        print!("{}", t.render());
    }

    if !s.recent_activity.is_empty() {
        println!("\nRecent activity");
        for w in &s.recent_activity {
            let when = parse_timestamp(&w.assigned_at)
                .map(|t| time_ago(t, s.last_updated))
                .unwrap_or_else(|| w.assigned_at.clone());
            println!("  {} · {} · {} ({})", when, w.detection_id, w.address, w.status);
        }
    }
    println!();
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Dashboard { watch, ticks } = cmd {
        if *watch {
            DashboardLogic::watch(cfg, *ticks, render)?;
        } else {
            let pool = DbPool::open(&cfg.database)?;
            render(&DashboardLogic::load(&pool, cfg)?);
        }
    }

    Ok(())
}
