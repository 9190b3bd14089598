use chrono::NaiveDate;
use wastedesk::core::staff::{StaffService, filter_staff, staff_stats};
use wastedesk::db::pool::DbPool;
use wastedesk::errors::AppError;
use wastedesk::models::{SortOrder, StaffFilter, StaffInput, StaffMember, StaffSortKey, StaffStatus};

fn names(v: &[StaffMember]) -> Vec<String> {
    v.iter().map(|m| m.name.clone()).collect()
}

fn input(name: &str) -> StaffInput {
    StaffInput {
        name: name.to_string(),
        phone: "+91 98300 00000".to_string(),
        working_area: "Sodepur".to_string(),
        status: StaffStatus::Active,
        join_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        total_collections: 42,
        rating: 4.5,
    }
}

#[test]
fn add_then_get_returns_the_same_fields() {
    let pool = DbPool::in_memory().unwrap();
    let asha = input("Asha Das");

    let id = StaffService::add(&pool, &asha).unwrap();
    assert!(!id.is_empty());

    let m = StaffService::get(&pool, &id, 5.0).unwrap();
    assert_eq!(m.id, id);
    assert!(m.matches_input(&asha));
    assert_eq!(m.join_date, "2024-03-15");
    assert!(m.created_at.is_some());
    assert!(!m.last_active.is_empty());
}

#[test]
fn invalid_input_is_rejected_before_writing() {
    let pool = DbPool::in_memory().unwrap();

    let err = StaffService::add(&pool, &input("   ")).unwrap_err();
    assert!(matches!(err, AppError::InvalidInput(_)));

    let mut bad = input("Ravi");
    bad.rating = 7.0;
    assert!(matches!(
        StaffService::add(&pool, &bad).unwrap_err(),
        AppError::InvalidInput(_)
    ));

    assert!(StaffService::list(&pool, 5.0).unwrap().is_empty());
}

#[test]
fn update_changes_fields_and_keeps_created_at() {
    let pool = DbPool::in_memory().unwrap();
    let id = StaffService::add(&pool, &input("Asha Das")).unwrap();
    let before = StaffService::get(&pool, &id, 5.0).unwrap();

    let mut changed = input("Asha Das");
    changed.status = StaffStatus::OnLeave;
    changed.total_collections = 50;
    StaffService::update(&pool, &id, &changed).unwrap();

    let after = StaffService::get(&pool, &id, 5.0).unwrap();
    assert!(after.matches_input(&changed));
    assert_eq!(after.created_at, before.created_at);
}

#[test]
fn update_and_delete_of_missing_member_are_not_found() {
    let pool = DbPool::in_memory().unwrap();

    assert!(StaffService::update(&pool, "nope", &input("X")).unwrap_err().is_not_found());
    assert!(StaffService::delete(&pool, "nope").unwrap_err().is_not_found());
    assert!(StaffService::get(&pool, "nope", 5.0).unwrap_err().is_not_found());
}

#[test]
fn delete_removes_member_from_roster() {
    let pool = DbPool::in_memory().unwrap();
    let a = StaffService::add(&pool, &input("Asha")).unwrap();
    StaffService::add(&pool, &input("Bikash")).unwrap();

    StaffService::delete(&pool, &a).unwrap();

    let remaining: Vec<String> = StaffService::list(&pool, 5.0)
        .unwrap()
        .into_iter()
        .map(|m| m.name)
        .collect();
    assert_eq!(remaining, vec!["Bikash"]);
}

#[test]
fn roster_filter_search_status_and_sort() {
    let pool = DbPool::in_memory().unwrap();

    let mut b = input("bikash");
    b.total_collections = 10;
    b.working_area = "Panihati".into();
    StaffService::add(&pool, &b).unwrap();

    let mut c = input("Chandra");
    c.status = StaffStatus::Inactive;
    c.total_collections = 99;
    StaffService::add(&pool, &c).unwrap();

    StaffService::add(&pool, &input("Asha")).unwrap();

    let roster = StaffService::list(&pool, 5.0).unwrap();
    assert_eq!(names(&roster), vec!["Asha", "bikash", "Chandra"]);

    let f = StaffFilter {
        search: Some("PANI".into()),
        ..StaffFilter::default()
    };
    assert_eq!(names(&filter_staff(&roster, &f)), vec!["bikash"]);

    let f = StaffFilter {
        status: Some(StaffStatus::Active),
        sort_by: StaffSortKey::TotalCollections,
        order: SortOrder::Desc,
        ..StaffFilter::default()
    };
    assert_eq!(names(&filter_staff(&roster, &f)), vec!["Asha", "bikash"]);

    let stats = staff_stats(&roster);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.active, 2);
    assert_eq!(stats.inactive, 1);
    assert_eq!(stats.total_collections, 42 + 10 + 99);
}
