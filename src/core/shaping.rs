//! Normalization of stored documents into read models.
//!
//! Documents in `model_results` come from more than one writer: some carry a
//! nested `location` object, some flat coordinates; some a `confidence_scores`
//! array of per-frame scores, some a single `confidence_score`. Every function
//! here is total. A missing or malformed field falls back to the next source
//! and finally to a default; nothing is reported.

use crate::models::{AssignedWork, DetectionRecord, StaffInput, StaffMember, StaffStatus, WorkStatus};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value, json};

pub const UNKNOWN_ADDRESS: &str = "Unknown Address";
pub const DEFAULT_ACCURACY: &str = "0";

fn finite(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Non-zero number, mirroring the falsy-zero fallback of the detection writers.
fn nonzero(v: Option<&Value>) -> Option<f64> {
    v.and_then(finite).filter(|n| *n != 0.0)
}

fn non_empty_str(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Timestamps arrive as ISO strings, epoch numbers, or exported
/// `{seconds, nanoseconds}` objects.
fn timestamp_str(v: Option<&Value>) -> Option<String> {
    match v? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => {
            let raw = n.as_f64()?;
            // anything past 1e11 cannot be seconds (year > 5000)
            let millis = if raw.abs() > 1e11 { raw } else { raw * 1000.0 };
            DateTime::from_timestamp_millis(millis as i64).map(|dt| dt.to_rfc3339())
        }
        Value::Object(obj) => {
            let secs = obj.get("seconds").or_else(|| obj.get("_seconds"))?.as_i64()?;
            let nanos = obj
                .get("nanoseconds")
                .or_else(|| obj.get("_nanoseconds"))
                .and_then(Value::as_u64)
                .unwrap_or(0);
            DateTime::from_timestamp(secs, nanos as u32).map(|dt| dt.to_rfc3339())
        }
        _ => None,
    }
}

fn location(doc: &Value) -> Option<&Map<String, Value>> {
    doc.get("location").and_then(Value::as_object)
}

fn nested_then_flat<'a>(doc: &'a Value, field: &str) -> [Option<&'a Value>; 2] {
    [location(doc).and_then(|l| l.get(field)), doc.get(field)]
}

fn coordinate(doc: &Value, field: &str) -> f64 {
    nested_then_flat(doc, field)
        .into_iter()
        .find_map(nonzero)
        .unwrap_or(0.0)
}

fn address(doc: &Value) -> String {
    nested_then_flat(doc, "address")
        .into_iter()
        .find_map(non_empty_str)
        .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string())
}

fn accuracy(doc: &Value) -> String {
    nested_then_flat(doc, "accuracy")
        .into_iter()
        .find_map(|v| match v? {
            Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        })
        .unwrap_or_else(|| DEFAULT_ACCURACY.to_string())
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = values.iter().sum::<f64>() / values.len() as f64;
    if m.is_finite() { m } else { 0.0 }
}

/// Confidence resolution: mean of a non-empty `confidence_scores` array, else
/// the scalar `confidence_score`, else 0. Always finite.
pub fn resolve_confidence(doc: &Value) -> f64 {
    if let Some(Value::Array(items)) = doc.get("confidence_scores") {
        let scores: Vec<f64> = items.iter().filter_map(finite).collect();
        if !scores.is_empty() {
            return mean(&scores);
        }
    }

    doc.get("confidence_score").and_then(finite).unwrap_or(0.0)
}

fn work_status(id: &str, doc: &Value) -> Option<WorkStatus> {
    let raw = doc.get("workStatus")?.as_str()?.trim();
    if raw.is_empty() {
        return None;
    }
    match WorkStatus::from_db_str(raw) {
        Some(s) => Some(s),
        None => {
            log::warn!("Detection {id}: unknown work status '{raw}', reading as pending");
            Some(WorkStatus::Pending)
        }
    }
}

pub fn shape_detection(id: &str, doc: &Value) -> DetectionRecord {
    shape_detection_at(id, doc, Utc::now())
}

/// [`shape_detection`] with an explicit clock for the timestamp fallback.
pub fn shape_detection_at(id: &str, doc: &Value, now: DateTime<Utc>) -> DetectionRecord {
    DetectionRecord {
        id: id.to_string(),
        latitude: coordinate(doc, "latitude"),
        longitude: coordinate(doc, "longitude"),
        confidence_score: resolve_confidence(doc),
        accuracy: accuracy(doc),
        address: address(doc),
        timestamp: timestamp_str(doc.get("createdAt"))
            .or_else(|| timestamp_str(doc.get("timestamp")))
            .unwrap_or_else(|| now.to_rfc3339()),
        model_version: non_empty_str(doc.get("model_version")),
        image_url: non_empty_str(doc.get("image_url")),
        staff_id: non_empty_str(doc.get("staffId")),
        work_status: work_status(id, doc),
    }
}

pub fn shape_assigned_work(id: &str, doc: &Value) -> AssignedWork {
    shape_assigned_work_at(id, doc, Utc::now())
}

pub fn shape_assigned_work_at(id: &str, doc: &Value, now: DateTime<Utc>) -> AssignedWork {
    let record = shape_detection_at(id, doc, now);
    let assigned_at = timestamp_str(doc.get("assignedAt"))
        .or_else(|| timestamp_str(doc.get("createdAt")))
        .unwrap_or_else(|| now.to_rfc3339());

    AssignedWork {
        status: record.status_or_pending(),
        detection_id: record.id,
        address: record.address,
        latitude: record.latitude,
        longitude: record.longitude,
        confidence_score: record.confidence_score,
        assigned_at,
    }
}

pub fn shape_staff(id: &str, doc: &Value, default_rating: f64) -> StaffMember {
    let text = |field: &str| non_empty_str(doc.get(field)).unwrap_or_default();

    let status = match doc.get("status").and_then(Value::as_str) {
        Some(raw) => StaffStatus::from_db_str(raw).unwrap_or_else(|| {
            log::warn!("Staff {id}: unknown status '{raw}', reading as inactive");
            StaffStatus::Inactive
        }),
        None => StaffStatus::Inactive,
    };

    StaffMember {
        id: id.to_string(),
        name: text("name"),
        phone: text("phone"),
        working_area: text("workingArea"),
        status,
        join_date: text("joinDate"),
        last_active: text("lastActive"),
        total_collections: doc
            .get("totalCollections")
            .and_then(finite)
            .map(|n| n.max(0.0) as u64)
            .unwrap_or(0),
        rating: doc
            .get("rating")
            .and_then(finite)
            .unwrap_or(default_rating),
        created_at: timestamp_str(doc.get("createdAt")),
        updated_at: timestamp_str(doc.get("updatedAt")),
    }
}

/// Staff document body for an add. `lastActive` and both timestamps are `now`.
pub fn staff_document(input: &StaffInput, now: DateTime<Utc>) -> Value {
    let mut doc = staff_fields(input, now);
    doc["createdAt"] = json!(now.to_rfc3339());
    doc
}

/// Fields written by an update; `createdAt` is left alone.
pub fn staff_fields(input: &StaffInput, now: DateTime<Utc>) -> Value {
    let now = now.to_rfc3339();
    json!({
        "name": input.name,
        "phone": input.phone,
        "workingArea": input.working_area,
        "status": input.status.as_str(),
        "joinDate": input.join_date.format("%Y-%m-%d").to_string(),
        "lastActive": now,
        "totalCollections": input.total_collections,
        "rating": input.rating,
        "updatedAt": now,
    })
}
