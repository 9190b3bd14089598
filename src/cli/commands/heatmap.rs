use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregate::{heatmap_points, heatmap_summary};
use crate::core::detection::DetectionService;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{header, info};
use crate::utils::colors::{color_for_confidence, paint};
use crate::utils::table::Table;
use crate::utils::truncate;
use chrono::Utc;
use serde_json::json;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Heatmap { limit, json } = cmd {
        let pool = DbPool::open(&cfg.database)?;
        let batch = DetectionService::fetch_all(&pool)?;
        let points = heatmap_points(&batch.results);

        if *json {
            let layer: Vec<_> = points
                .iter()
                .map(|p| json!({ "lat": p.lat, "lng": p.lng, "weight": p.normalized() }))
                .collect();
            println!("{}", serde_json::to_string_pretty(&layer)?);
            return Ok(());
        }

        if points.is_empty() {
            info("No detections with coordinates.");
            return Ok(());
        }

        let summary = heatmap_summary(&points, Utc::now());
        header("Heatmap");
        println!("Data points       : {}", summary.total_data_points);
        println!("Average intensity : {:.1}", summary.average_intensity);
        println!("Max intensity     : {:.1}", summary.max_intensity);
        println!(
            "Last updated      : {}\n",
            summary.last_updated.format("%Y-%m-%d %H:%M:%S UTC")
        );

        let mut table = Table::new(&["LAT", "LNG", "INTENSITY", "ADDRESS"]);
        for p in points.iter().take(*limit) {
            table.add_row(vec![
                format!("{:.5}", p.lat),
                format!("{:.5}", p.lng),
                paint(color_for_confidence(p.intensity), &format!("{:.1}", p.intensity)),
                truncate(&p.address, 48),
            ]);
        }
        print!("{}", table.render());
    }

    Ok(())
}
