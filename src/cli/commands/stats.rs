use crate::config::Config;
use crate::core::assignment::AssignmentService;
use crate::core::detection::DetectionService;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{BLUE, CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::format_percent;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let pool = DbPool::open(&cfg.database)?;

    let batch = DetectionService::fetch_all(&pool)?;
    let summary = DetectionService::summarize(&batch.results);
    let stats = AssignmentService::assignment_stats(&pool)?;

    header("Detections");
    println!("{CYAN}• Total:{RESET}              {}", summary.total);
    println!(
        "{CYAN}• Average confidence:{RESET} {}",
        format_percent(summary.average_confidence)
    );
    if summary.total > 0 {
        println!(
            "{CYAN}• Range:{RESET}              {} – {}",
            format_percent(summary.min_confidence),
            format_percent(summary.max_confidence)
        );
    }

    println!();
    header("Assignments");
    println!("{CYAN}• Assigned:{RESET}           {}", stats.total_assignments);
    println!("{YELLOW}  pending:{RESET}            {}", stats.pending_assignments);
    println!("{BLUE}  in progress:{RESET}        {}", stats.in_progress_assignments);
    println!("{GREEN}  completed:{RESET}          {}", stats.completed_assignments);
    println!("{GREY}  cancelled:{RESET}          {}", stats.cancelled_assignments);
    println!("{CYAN}• Unassigned:{RESET}         {}", stats.unassigned_detections);
    println!("{CYAN}• Staff with work:{RESET}    {}", stats.staff_with_work);

    Ok(())
}
