use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::detection::DetectionService;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::models::DetectionRecord;
use crate::ui::messages::{header, info};
use crate::utils::colors::{GREY, color_for_confidence, color_for_work_status, paint};
use crate::utils::table::Table;
use crate::utils::{format_percent, truncate};

pub(crate) fn detections_table(records: &[DetectionRecord]) -> Table {
    let mut table = Table::new(&["ID", "WHEN", "ADDRESS", "CONFIDENCE", "STAFF", "STATUS"]);

    for r in records {
        let pct = r.confidence_percent();
        let status = match r.work_status {
            Some(s) => paint(color_for_work_status(s), s.as_str()),
            None if r.is_assigned() => paint(color_for_work_status(r.status_or_pending()), "pending"),
            None => paint(GREY, "--"),
        };

        table.add_row(vec![
            r.id.clone(),
            r.timestamp.clone(),
            truncate(&r.address, 48),
            paint(color_for_confidence(pct), &format_percent(r.confidence_score)),
            r.staff_id.clone().unwrap_or_else(|| "--".into()),
            status,
        ]);
    }

    table
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Detections {
        limit,
        all,
        unassigned,
    } = cmd
    {
        let pool = DbPool::open(&cfg.database)?;

        let (records, total, average) = if *unassigned {
            let mut records = DetectionService::fetch_unassigned(&pool)?;
            let total = records.len();
            let average = crate::core::aggregate::mean_confidence(&records);
            if !*all {
                records.truncate(limit.unwrap_or(cfg.page_size));
            }
            (records, total, average)
        } else {
            let mut batch = DetectionService::fetch_all(&pool)?;
            if !*all {
                batch.results.truncate(limit.unwrap_or(cfg.page_size));
            }
            (batch.results, batch.total_count, batch.average_confidence)
        };

        if records.is_empty() {
            info("No detections found.");
            return Ok(());
        }

        header(if *unassigned { "Unassigned detections" } else { "Detections" });
        print!("{}", detections_table(&records).render());
        println!(
            "\n{} of {} shown · average confidence {}",
            records.len(),
            total,
            format_percent(average)
        );
    }

    Ok(())
}
