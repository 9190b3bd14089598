use chrono::{DateTime, Utc};
use serde_json::json;
use wastedesk::core::shaping::{
    DEFAULT_ACCURACY, UNKNOWN_ADDRESS, resolve_confidence, shape_assigned_work_at, shape_detection_at,
    shape_staff,
};
use wastedesk::models::{StaffStatus, WorkStatus};

fn now() -> DateTime<Utc> {
    "2025-06-01T12:00:00Z".parse().unwrap()
}

#[test]
fn confidence_prefers_array_mean_then_scalar() {
    let cases = [
        (json!({"confidence_scores": [0.2, 0.4, 0.6]}), 0.4),
        (json!({"confidence_scores": [0.2, 0.4, 0.6], "confidence_score": 0.9}), 0.4),
        (json!({"confidence_scores": [], "confidence_score": 0.9}), 0.9),
        (json!({"confidence_scores": ["x", null], "confidence_score": 0.7}), 0.7),
        (json!({"confidence_score": "0.55"}), 0.55),
        (json!({"confidence_score": null}), 0.0),
        (json!({}), 0.0),
    ];

    for (doc, expected) in cases {
        let got = resolve_confidence(&doc);
        assert!((got - expected).abs() < 1e-9, "{doc} -> {got}, expected {expected}");
    }
}

#[test]
fn nested_location_wins_over_flat_fields() {
    let doc = json!({
        "location": {"latitude": 22.7, "longitude": 88.4, "address": "Nested", "accuracy": 8},
        "latitude": 1.0,
        "longitude": 2.0,
        "address": "Flat"
    });

    let r = shape_detection_at("d1", &doc, now());
    assert_eq!(r.latitude, 22.7);
    assert_eq!(r.longitude, 88.4);
    assert_eq!(r.address, "Nested");
    assert_eq!(r.accuracy, "8");
}

#[test]
fn zero_nested_coordinates_fall_back_to_flat_ones() {
    let doc = json!({
        "location": {"latitude": 0, "longitude": 0},
        "latitude": 22.5,
        "longitude": 88.3
    });

    let r = shape_detection_at("d1", &doc, now());
    assert_eq!((r.latitude, r.longitude), (22.5, 88.3));
}

#[test]
fn empty_document_gets_every_default() {
    let r = shape_detection_at("bare", &json!({}), now());

    assert_eq!(r.id, "bare");
    assert_eq!((r.latitude, r.longitude), (0.0, 0.0));
    assert_eq!(r.confidence_score, 0.0);
    assert_eq!(r.address, UNKNOWN_ADDRESS);
    assert_eq!(r.accuracy, DEFAULT_ACCURACY);
    assert_eq!(r.timestamp, now().to_rfc3339());
    assert!(r.staff_id.is_none());
    assert!(r.work_status.is_none());
    assert!(!r.has_location());
}

#[test]
fn timestamps_accept_strings_epochs_and_objects() {
    let expected = "2025-05-02T08:30:00+00:00";
    let cases = [
        json!({"createdAt": "2025-05-02T08:30:00+00:00"}),
        json!({"createdAt": 1746174600}),
        json!({"createdAt": 1746174600000_i64}),
        json!({"createdAt": {"seconds": 1746174600, "nanoseconds": 0}}),
        json!({"timestamp": {"_seconds": 1746174600, "_nanoseconds": 0}}),
    ];

    for doc in cases {
        let r = shape_detection_at("t", &doc, now());
        assert_eq!(r.timestamp, expected, "{doc}");
    }
}

#[test]
fn unknown_work_status_reads_as_pending() {
    let r = shape_detection_at("d", &json!({"staffId": "s1", "workStatus": "exploded"}), now());
    assert_eq!(r.work_status, Some(WorkStatus::Pending));

    let r = shape_detection_at("d", &json!({"staffId": "s1", "workStatus": "in_progress"}), now());
    assert_eq!(r.work_status, Some(WorkStatus::InProgress));
}

#[test]
fn assigned_at_falls_back_to_created_at() {
    let doc = json!({"staffId": "s1", "createdAt": "2025-05-01T00:00:00Z"});
    let w = shape_assigned_work_at("d", &doc, now());
    assert_eq!(w.assigned_at, "2025-05-01T00:00:00Z");
    assert_eq!(w.status, WorkStatus::Pending);

    let w = shape_assigned_work_at("d", &json!({"staffId": "s1"}), now());
    assert_eq!(w.assigned_at, now().to_rfc3339());
}

#[test]
fn staff_defaults_and_status_spellings() {
    let m = shape_staff("s1", &json!({"name": "Asha", "status": "On Leave"}), 4.0);
    assert_eq!(m.status, StaffStatus::OnLeave);
    assert_eq!(m.rating, 4.0);
    assert_eq!(m.total_collections, 0);
    assert_eq!(m.phone, "");

    let m = shape_staff("s2", &json!({"status": "retired", "rating": 3.5}), 4.0);
    assert_eq!(m.status, StaffStatus::Inactive);
    assert_eq!(m.rating, 3.5);
}
