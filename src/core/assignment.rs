//! Staff/assignment read-join and the assignment write paths.
//!
//! The per-staff lookup filters on `staffId` only and orders by `assignedAt`
//! in memory; the store is never asked for a filtered + ordered scan.

use crate::core::aggregate::assignment_stats;
use crate::core::detection::DetectionService;
use crate::core::shaping::{shape_assigned_work_at, shape_detection_at};
use crate::core::staff::StaffService;
use crate::db::store::{DETECTIONS, DocumentStore, Filter, Query, STAFF};
use crate::errors::{AppError, AppResult, passthrough_or};
use crate::models::{AssignedWork, AssignmentStats, StaffWorkload, WorkStatus};
use crate::utils::date::parse_timestamp;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use std::collections::HashMap;

pub struct AssignmentService;

/// `assignedAt` descending. Unparseable stamps go last, in source order.
pub fn sort_by_assigned_at_desc(work: &mut [AssignedWork]) {
    work.sort_by(|a, b| {
        let ta = parse_timestamp(&a.assigned_at);
        let tb = parse_timestamp(&b.assigned_at);
        match (ta, tb) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
    });
}

/// Work assigned in the `hours` before `now`, newest first.
pub fn recent_assignments_at(
    work: Vec<AssignedWork>,
    hours: i64,
    now: DateTime<Utc>,
) -> AppResult<Vec<AssignedWork>> {
    let cutoff = Duration::try_hours(hours)
        .and_then(|window| now.checked_sub_signed(window))
        .ok_or_else(|| AppError::InvalidInput(format!("hours out of range: {hours}")))?;

    let mut recent: Vec<AssignedWork> = work
        .into_iter()
        .filter(|w| parse_timestamp(&w.assigned_at).is_some_and(|t| t >= cutoff))
        .collect();
    sort_by_assigned_at_desc(&mut recent);
    Ok(recent)
}

/// Shaped `(staff id, work)` pairs for every detection someone is working on.
/// Blank `staffId` values count as unassigned, the same as in the stats.
fn assigned_pairs(store: &impl DocumentStore, what: &str) -> AppResult<Vec<(String, AssignedWork)>> {
    let docs = store
        .query(&Query::collection(DETECTIONS).filter(Filter::not_null("staffId")))
        .map_err(|e| AppError::fetch_failed(what, e))?;

    let now = Utc::now();
    Ok(docs
        .iter()
        .filter_map(|d| {
            let staff_id = shape_detection_at(&d.id, &d.data, now).staff_id?;
            Some((staff_id, shape_assigned_work_at(&d.id, &d.data, now)))
        })
        .collect())
}

impl AssignmentService {
    /// All detections assigned to `staff_id`, newest assignment first.
    /// Any store failure fails the whole call.
    pub fn assigned_work_for_staff(
        store: &impl DocumentStore,
        staff_id: &str,
    ) -> AppResult<Vec<AssignedWork>> {
        let q = Query::collection(DETECTIONS).filter(Filter::eq("staffId", staff_id));
        let docs = store
            .query(&q)
            .map_err(|e| AppError::fetch_failed("assigned work", e))?;

        let now = Utc::now();
        let mut work: Vec<AssignedWork> = docs
            .iter()
            .map(|d| shape_assigned_work_at(&d.id, &d.data, now))
            .collect();

        sort_by_assigned_at_desc(&mut work);
        Ok(work)
    }

    /// Every staff member joined with their assigned work.
    pub fn staff_with_assigned_work(
        store: &impl DocumentStore,
        default_rating: f64,
    ) -> AppResult<Vec<StaffWorkload>> {
        let staff = StaffService::list(store, default_rating)?;

        let mut by_staff: HashMap<String, Vec<AssignedWork>> = HashMap::new();
        for (staff_id, work) in assigned_pairs(store, "staff with assigned work")? {
            by_staff.entry(staff_id).or_default().push(work);
        }

        Ok(staff
            .into_iter()
            .map(|member| {
                let mut assigned_work = by_staff.remove(&member.id).unwrap_or_default();
                sort_by_assigned_at_desc(&mut assigned_work);

                let completed = assigned_work
                    .iter()
                    .filter(|w| w.status == WorkStatus::Completed)
                    .count();
                let pending = assigned_work.iter().filter(|w| w.status.is_open()).count();

                StaffWorkload {
                    staff: member,
                    total_assigned: assigned_work.len(),
                    completed,
                    pending,
                    assigned_work,
                }
            })
            .collect())
    }

    pub fn assignment_stats(store: &impl DocumentStore) -> AppResult<AssignmentStats> {
        let records = DetectionService::records(store, &Query::collection(DETECTIONS))?;
        Ok(assignment_stats(&records))
    }

    /// Writes any status label; there is no transition check.
    pub fn update_work_status(
        store: &impl DocumentStore,
        detection_id: &str,
        status: WorkStatus,
    ) -> AppResult<()> {
        let patch = json!({
            "workStatus": status.as_str(),
            "updatedAt": Utc::now().to_rfc3339(),
        });

        store
            .update(DETECTIONS, detection_id, &patch)
            .map_err(|e| passthrough_or(e, |e| AppError::update_failed("work status", e)))
    }

    /// Attach a detection to an existing staff member as pending work.
    pub fn assign(store: &impl DocumentStore, detection_id: &str, staff_id: &str) -> AppResult<()> {
        let staff = store
            .get(STAFF, staff_id)
            .map_err(|e| AppError::fetch_failed("staff", e))?;
        if staff.is_none() {
            return Err(AppError::not_found(STAFF, staff_id));
        }

        let now = Utc::now().to_rfc3339();
        let patch = json!({
            "staffId": staff_id,
            "workStatus": WorkStatus::Pending.as_str(),
            "assignedAt": now,
            "updatedAt": now,
        });

        store
            .update(DETECTIONS, detection_id, &patch)
            .map_err(|e| passthrough_or(e, |e| AppError::update_failed("assignment", e)))
    }

    /// Ids of detections nobody is working on.
    pub fn unassigned_detections(store: &impl DocumentStore) -> AppResult<Vec<String>> {
        Ok(DetectionService::fetch_unassigned(store)?
            .into_iter()
            .map(|r| r.id)
            .collect())
    }

    pub fn recent_assignments(
        store: &impl DocumentStore,
        hours: i64,
    ) -> AppResult<Vec<AssignedWork>> {
        let work = assigned_pairs(store, "recent assignments")?
            .into_iter()
            .map(|(_, work)| work)
            .collect();

        recent_assignments_at(work, hours, Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work(id: &str, assigned_at: &str) -> AssignedWork {
        AssignedWork {
            detection_id: id.into(),
            address: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            confidence_score: 0.0,
            assigned_at: assigned_at.into(),
            status: WorkStatus::Pending,
        }
    }

    fn ids(w: &[AssignedWork]) -> Vec<&str> {
        w.iter().map(|w| w.detection_id.as_str()).collect()
    }

    #[test]
    fn newest_assignment_first_and_garbage_last() {
        let mut w = vec![
            work("a", "2025-01-01T10:00:00Z"),
            work("b", "not a date"),
            work("c", "2025-03-01T10:00:00+05:30"),
        ];
        sort_by_assigned_at_desc(&mut w);
        assert_eq!(ids(&w), vec!["c", "a", "b"]);
    }

    #[test]
    fn recent_window_is_inclusive() {
        let now = "2025-06-02T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let w = vec![
            work("edge", "2025-06-01T12:00:00Z"),
            work("old", "2025-06-01T11:59:59Z"),
            work("new", "2025-06-02T11:00:00Z"),
        ];
        assert_eq!(ids(&recent_assignments_at(w, 24, now).unwrap()), vec!["new", "edge"]);
    }

    #[test]
    fn oversized_window_is_rejected() {
        let now = Utc::now();
        let err = recent_assignments_at(vec![work("a", "2025-06-01T12:00:00Z")], i64::MAX, now)
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
