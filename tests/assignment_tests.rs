use chrono::NaiveDate;
use serde_json::{Value, json};
use wastedesk::config::Config;
use wastedesk::core::assignment::AssignmentService;
use wastedesk::core::dashboard::DashboardLogic;
use wastedesk::core::detection::DetectionService;
use wastedesk::core::staff::StaffService;
use wastedesk::db::pool::DbPool;
use wastedesk::db::store::{DETECTIONS, DocumentStore};
use wastedesk::models::{DetectionRecord, StaffInput, StaffStatus, WorkStatus};

fn detections() -> Vec<Value> {
    vec![
        json!({"id": "old", "address": "BT Road, Kolkata", "confidence_score": 0.5, "createdAt": "2025-05-01T00:00:00Z"}),
        json!({"id": "mid", "address": "Nilgunj Road, Sodepur", "confidence_scores": [0.6, 0.8], "createdAt": "2025-05-02T00:00:00Z"}),
        json!({"id": "new", "address": "BT Road, Kolkata", "confidence_score": 0.9, "createdAt": "2025-05-03T00:00:00Z"}),
    ]
}

fn seeded() -> DbPool {
    let pool = DbPool::in_memory().unwrap();
    assert_eq!(DetectionService::import(&pool, &detections()).unwrap(), 3);
    pool
}

fn staff(pool: &DbPool, name: &str) -> String {
    StaffService::add(
        pool,
        &StaffInput {
            name: name.into(),
            phone: String::new(),
            working_area: "Sodepur".into(),
            status: StaffStatus::Active,
            join_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            total_collections: 0,
            rating: 4.0,
        },
    )
    .unwrap()
}

fn record_ids(records: &[DetectionRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn import_keeps_ids_and_replaces_on_reimport() {
    let pool = seeded();

    let doc = pool.get(DETECTIONS, "mid").unwrap().unwrap();
    assert!(doc.data.get("id").is_none());

    DetectionService::import(&pool, &[json!({"id": "mid", "address": "Changed"})]).unwrap();
    let r = DetectionService::get(&pool, "mid").unwrap();
    assert_eq!(r.address, "Changed");
    assert_eq!(DetectionService::fetch_all(&pool).unwrap().total_count, 3);
}

#[test]
fn import_rejects_non_objects() {
    let pool = DbPool::in_memory().unwrap();
    assert!(DetectionService::import(&pool, &[json!([1, 2])]).is_err());
}

#[test]
fn fetch_is_newest_first_and_page_is_limited() {
    let pool = seeded();

    let all = DetectionService::fetch_all(&pool).unwrap();
    assert_eq!(record_ids(&all.results), vec!["new", "mid", "old"]);
    assert_eq!(all.total_count, 3);
    assert!((all.average_confidence - 0.7).abs() < 1e-9);

    let page = DetectionService::fetch_page(&pool, 2).unwrap();
    assert_eq!(record_ids(&page.results), vec!["new", "mid"]);
    assert_eq!(page.total_count, 2);
}

#[test]
fn assign_requires_existing_staff_and_detection() {
    let pool = seeded();

    let err = AssignmentService::assign(&pool, "old", "ghost").unwrap_err();
    assert!(err.is_not_found());

    let s = staff(&pool, "Asha");
    let err = AssignmentService::assign(&pool, "missing", &s).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn assignment_flow_updates_joins_and_stats() {
    let pool = seeded();
    let asha = staff(&pool, "Asha");
    let ravi = staff(&pool, "Ravi");

    AssignmentService::assign(&pool, "old", &asha).unwrap();
    AssignmentService::assign(&pool, "new", &asha).unwrap();

    let work = AssignmentService::assigned_work_for_staff(&pool, &asha).unwrap();
    assert_eq!(work.len(), 2);
    assert!(work.iter().all(|w| w.status == WorkStatus::Pending));

    AssignmentService::update_work_status(&pool, "old", WorkStatus::Completed).unwrap();

    let unassigned = AssignmentService::unassigned_detections(&pool).unwrap();
    assert_eq!(unassigned, vec!["mid"]);

    let stats = AssignmentService::assignment_stats(&pool).unwrap();
    assert_eq!(stats.total_assignments, 2);
    assert_eq!(stats.completed_assignments, 1);
    assert_eq!(stats.pending_assignments, 1);
    assert_eq!(stats.unassigned_detections, 1);
    assert_eq!(stats.staff_with_work, 1);

    let joined = AssignmentService::staff_with_assigned_work(&pool, 5.0).unwrap();
    assert_eq!(joined.len(), 2);

    let a = joined.iter().find(|w| w.staff.id == asha).unwrap();
    assert_eq!(a.total_assigned, 2);
    assert_eq!(a.completed, 1);
    assert_eq!(a.pending, 1);

    let r = joined.iter().find(|w| w.staff.id == ravi).unwrap();
    assert_eq!(r.total_assigned, 0);
    assert!(r.assigned_work.is_empty());
}

#[test]
fn work_status_on_missing_detection_is_not_found() {
    let pool = seeded();
    let err = AssignmentService::update_work_status(&pool, "nope", WorkStatus::Cancelled).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn fresh_assignments_are_recent() {
    let pool = seeded();
    let asha = staff(&pool, "Asha");
    AssignmentService::assign(&pool, "mid", &asha).unwrap();

    // imported with an old assignedAt
    DetectionService::import(
        &pool,
        &[json!({"id": "stale", "staffId": asha, "assignedAt": "2020-01-01T00:00:00Z"})],
    )
    .unwrap();

    let recent = AssignmentService::recent_assignments(&pool, 24).unwrap();
    assert_eq!(recent.len(), 1);
    assert_eq!(recent[0].detection_id, "mid");
}

#[test]
fn deleting_staff_leaves_assignments_in_place() {
    let pool = seeded();
    let asha = staff(&pool, "Asha");
    AssignmentService::assign(&pool, "old", &asha).unwrap();

    StaffService::delete(&pool, &asha).unwrap();

    let work = AssignmentService::assigned_work_for_staff(&pool, &asha).unwrap();
    assert_eq!(work.len(), 1);
    assert!(AssignmentService::staff_with_assigned_work(&pool, 5.0).unwrap().is_empty());
}

#[test]
fn dashboard_snapshot_combines_every_view() {
    let pool = seeded();
    let asha = staff(&pool, "Asha");
    AssignmentService::assign(&pool, "new", &asha).unwrap();

    let snap = DashboardLogic::load(&pool, &Config::default()).unwrap();
    assert_eq!(snap.detections.total, 3);
    assert_eq!(snap.assignments.total_assignments, 1);
    assert_eq!(snap.staff.total, 1);
    assert_eq!(snap.top_areas[0].area, "BT Road");
    assert_eq!(snap.top_areas[0].count, 2);
    assert_eq!(snap.recent_activity.len(), 1);
}

#[test]
fn blank_staff_id_counts_as_unassigned_everywhere() {
    let pool = DbPool::in_memory().unwrap();
    let asha = staff(&pool, "Asha");
    DetectionService::import(
        &pool,
        &[
            json!({"id": "blank", "staffId": "", "assignedAt": "2099-01-01T00:00:00Z"}),
            json!({"id": "spaces", "staffId": "   "}),
            json!({"id": "none"}),
            json!({"id": "taken", "staffId": asha}),
        ],
    )
    .unwrap();

    let stats = AssignmentService::assignment_stats(&pool).unwrap();
    let mut unassigned = AssignmentService::unassigned_detections(&pool).unwrap();
    unassigned.sort();

    assert_eq!(stats.unassigned_detections, unassigned.len());
    assert_eq!(unassigned, vec!["blank", "none", "spaces"]);

    let recent = AssignmentService::recent_assignments(&pool, 24).unwrap();
    assert!(recent.iter().all(|w| w.detection_id != "blank"));

    let joined = AssignmentService::staff_with_assigned_work(&pool, 5.0).unwrap();
    let total: usize = joined.iter().map(|w| w.total_assigned).sum();
    assert_eq!(total, stats.total_assignments);
    assert_eq!(total, 1);
}
