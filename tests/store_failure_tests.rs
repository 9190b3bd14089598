use chrono::NaiveDate;
use serde_json::Value;
use wastedesk::core::assignment::AssignmentService;
use wastedesk::core::detection::DetectionService;
use wastedesk::core::staff::StaffService;
use wastedesk::db::pool::DbPool;
use wastedesk::db::store::{Document, DocumentStore, Query};
use wastedesk::errors::{AppError, AppResult};
use wastedesk::models::{StaffInput, StaffStatus, WorkStatus};

/// Store whose every call fails the way a dropped connection would.
struct OfflineStore;

fn offline<T>() -> AppResult<T> {
    Err(AppError::Other("connection reset".into()))
}

impl DocumentStore for OfflineStore {
    fn query(&self, _query: &Query) -> AppResult<Vec<Document>> {
        offline()
    }

    fn get(&self, _collection: &str, _id: &str) -> AppResult<Option<Document>> {
        offline()
    }

    fn add(&self, _collection: &str, _data: &Value) -> AppResult<String> {
        offline()
    }

    fn put(&self, _collection: &str, _id: &str, _data: &Value) -> AppResult<()> {
        offline()
    }

    fn update(&self, _collection: &str, _id: &str, _patch: &Value) -> AppResult<()> {
        offline()
    }

    fn delete(&self, _collection: &str, _id: &str) -> AppResult<()> {
        offline()
    }
}

fn input(name: &str, rating: f64) -> StaffInput {
    StaffInput {
        name: name.into(),
        phone: String::new(),
        working_area: "Sodepur".into(),
        status: StaffStatus::Active,
        join_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        total_collections: 0,
        rating,
    }
}

#[test]
fn reads_collapse_to_fetch_failure() {
    let res = AssignmentService::assigned_work_for_staff(&OfflineStore, "s1");
    assert!(matches!(res, Err(AppError::Fetch(_))), "got {res:?}");

    assert!(matches!(
        AssignmentService::staff_with_assigned_work(&OfflineStore, 5.0),
        Err(AppError::Fetch(_))
    ));
    assert!(matches!(
        DetectionService::fetch_all(&OfflineStore),
        Err(AppError::Fetch(_))
    ));
    assert!(matches!(
        StaffService::get(&OfflineStore, "s1", 5.0),
        Err(AppError::Fetch(_))
    ));
}

#[test]
fn writes_collapse_to_update_or_delete_failure() {
    assert!(matches!(
        StaffService::delete(&OfflineStore, "s1"),
        Err(AppError::Delete(_))
    ));
    assert!(matches!(
        StaffService::add(&OfflineStore, &input("Asha", 4.0)),
        Err(AppError::Update(_))
    ));
    assert!(matches!(
        AssignmentService::update_work_status(&OfflineStore, "d1", WorkStatus::Completed),
        Err(AppError::Update(_))
    ));
}

#[test]
fn failure_message_does_not_leak_store_detail() {
    let err = StaffService::delete(&OfflineStore, "s1").unwrap_err();
    assert_eq!(err.to_string(), "Failed to delete staff");
}

#[test]
fn not_found_and_validation_pass_through() {
    let pool = DbPool::in_memory().unwrap();

    let err = AssignmentService::update_work_status(&pool, "missing", WorkStatus::Completed)
        .unwrap_err();
    assert!(err.is_not_found());

    let err = StaffService::delete(&pool, "missing").unwrap_err();
    assert!(err.is_not_found());

    // validation runs before the store is touched
    let err = StaffService::add(&OfflineStore, &input("  ", 4.0)).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));
}
