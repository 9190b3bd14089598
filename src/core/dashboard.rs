use crate::config::Config;
use crate::core::aggregate::{group_by_area, summarize};
use crate::core::assignment::AssignmentService;
use crate::core::detection::DetectionService;
use crate::core::refresh::{Latest, Sequencer};
use crate::core::staff::{StaffService, staff_stats};
use crate::db::pool::DbPool;
use crate::db::store::DocumentStore;
use crate::errors::{AppError, AppResult};
use crate::models::{AreaSummary, AssignedWork, AssignmentStats, DetectionSummary, StaffStats};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::thread;
use std::time::Duration;

pub const TOP_AREAS: usize = 5;
pub const RECENT_ACTIVITY: usize = 5;

/// Everything the home view shows, loaded in one pass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub detections: DetectionSummary,
    pub assignments: AssignmentStats,
    pub staff: StaffStats,
    pub top_areas: Vec<AreaSummary>,
    pub recent_activity: Vec<AssignedWork>,
    pub last_updated: DateTime<Utc>,
}

pub struct DashboardLogic;

impl DashboardLogic {
    pub fn load(store: &impl DocumentStore, cfg: &Config) -> AppResult<DashboardSnapshot> {
        let batch = DetectionService::fetch_all(store)?;
        let staff = StaffService::list(store, cfg.default_rating)?;
        let assignments = AssignmentService::assignment_stats(store)?;

        let mut top_areas = group_by_area(&batch.results, &cfg.area_denylist);
        top_areas.truncate(TOP_AREAS);

        let mut recent_activity = AssignmentService::recent_assignments(store, cfg.recent_hours)?;
        recent_activity.truncate(RECENT_ACTIVITY);

        Ok(DashboardSnapshot {
            detections: summarize(&batch.results),
            assignments,
            staff: staff_stats(&staff),
            top_areas,
            recent_activity,
            last_updated: Utc::now(),
        })
    }

    /// Reload every `refresh_interval_secs`, `ticks` times (forever if `None`).
    ///
    /// Each tick loads on its own thread and connection, so a slow load can
    /// still be running when the next one starts. Only snapshots newer than the
    /// one on screen reach `render`. Failed loads are reported and skipped.
    pub fn watch<R>(cfg: &Config, ticks: Option<u64>, render: R) -> AppResult<()>
    where
        R: Fn(&DashboardSnapshot) + Sync,
    {
        let sequencer = Sequencer::new();
        let latest: Latest<DashboardSnapshot> = Latest::new();
        let interval = Duration::from_secs(cfg.refresh_interval_secs);

        thread::scope(|scope| {
            let mut tick: u64 = 0;
            loop {
                let ticket = sequencer.ticket();
                let (latest, render) = (&latest, &render);

                scope.spawn(move || {
                    let result =
                        DbPool::open(&cfg.database).and_then(|pool| Self::load(&pool, cfg));
                    match result {
                        Ok(snapshot) => {
                            latest.publish_and(ticket, snapshot, render);
                        }
                        Err(e) => {
                            log::error!("Dashboard refresh #{} failed: {e}", ticket.number());
                            crate::ui::messages::error(format!("Refresh failed: {e}"));
                        }
                    }
                });

                tick += 1;
                if ticks.is_some_and(|n| tick >= n) {
                    break;
                }
                thread::sleep(interval);
            }
        });

        if latest.accepted() == 0 {
            return Err(AppError::fetch_failed("dashboard", "no refresh succeeded"));
        }
        Ok(())
    }
}
