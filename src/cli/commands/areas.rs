use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregate::group_by_area;
use crate::core::detection::DetectionService;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::format_percent;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Areas { limit } = cmd {
        let pool = DbPool::open(&cfg.database)?;
        let batch = DetectionService::fetch_all(&pool)?;

        let mut areas = group_by_area(&batch.results, &cfg.area_denylist);
        if areas.is_empty() {
            info("No detections found.");
            return Ok(());
        }
        let total_areas = areas.len();
        if let Some(n) = limit {
            areas.truncate(*n);
        }

        let mut table = Table::new(&["AREA", "DETECTIONS", "LATEST", "AVG CONFIDENCE"]);
        for a in &areas {
            table.add_row(vec![
                a.area.clone(),
                a.count.to_string(),
                a.latest_detection.clone(),
                format_percent(a.average_confidence),
            ]);
        }

        header("Detections by area");
        print!("{}", table.render());
        println!("\n{} of {} areas shown", areas.len(), total_areas);
    }

    Ok(())
}
