use crate::core::shaping::{mean, shape_staff, staff_document, staff_fields};
use crate::db::store::{DocumentStore, Query, STAFF};
use crate::errors::{AppError, AppResult, passthrough_or};
use crate::models::{SortOrder, StaffFilter, StaffInput, StaffMember, StaffSortKey, StaffStats, StaffStatus};
use chrono::Utc;
use std::cmp::Ordering;

/// CRUD over the `staff` collection.
pub struct StaffService;

impl StaffService {
    pub fn validate(input: &StaffInput) -> AppResult<()> {
        if input.name.trim().is_empty() {
            return Err(AppError::InvalidInput("staff name cannot be empty".into()));
        }
        if !input.rating.is_finite() || !(0.0..=5.0).contains(&input.rating) {
            return Err(AppError::InvalidInput(format!(
                "rating must be between 0 and 5 (got {})",
                input.rating
            )));
        }
        Ok(())
    }

    /// Returns the generated identifier.
    pub fn add(store: &impl DocumentStore, input: &StaffInput) -> AppResult<String> {
        Self::validate(input)?;
        store
            .add(STAFF, &staff_document(input, Utc::now()))
            .map_err(|e| passthrough_or(e, |e| AppError::update_failed("staff", e)))
    }

    pub fn get(store: &impl DocumentStore, id: &str, default_rating: f64) -> AppResult<StaffMember> {
        let doc = store
            .get(STAFF, id)
            .map_err(|e| AppError::fetch_failed("staff", e))?
            .ok_or_else(|| AppError::not_found(STAFF, id))?;

        Ok(shape_staff(&doc.id, &doc.data, default_rating))
    }

    /// Whole roster, ordered by name.
    pub fn list(store: &impl DocumentStore, default_rating: f64) -> AppResult<Vec<StaffMember>> {
        let docs = store
            .query(&Query::collection(STAFF))
            .map_err(|e| AppError::fetch_failed("staff", e))?;

        let mut staff: Vec<StaffMember> = docs
            .iter()
            .map(|d| shape_staff(&d.id, &d.data, default_rating))
            .collect();
        staff.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(staff)
    }

    pub fn update(store: &impl DocumentStore, id: &str, input: &StaffInput) -> AppResult<()> {
        Self::validate(input)?;
        store
            .update(STAFF, id, &staff_fields(input, Utc::now()))
            .map_err(|e| passthrough_or(e, |e| AppError::update_failed("staff", e)))
    }

    /// Assignments pointing at the removed member are left as they are.
    pub fn delete(store: &impl DocumentStore, id: &str) -> AppResult<()> {
        store
            .delete(STAFF, id)
            .map_err(|e| passthrough_or(e, |e| AppError::delete_failed("staff", e)))
    }
}

/// A stored rating carried into an edit. Documents written outside the app
/// may hold values past 0–5; those are pulled back into range.
pub fn carried_rating(rating: f64) -> f64 {
    rating.clamp(0.0, 5.0)
}

fn compare(a: &StaffMember, b: &StaffMember, key: StaffSortKey) -> Ordering {
    match key {
        StaffSortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        StaffSortKey::JoinDate => a.join_date.cmp(&b.join_date),
        StaffSortKey::TotalCollections => a.total_collections.cmp(&b.total_collections),
        StaffSortKey::Rating => a.rating.total_cmp(&b.rating),
    }
}

/// Search, status filter and sort, as the roster view applies them.
pub fn filter_staff(staff: &[StaffMember], filter: &StaffFilter) -> Vec<StaffMember> {
    let needle = filter
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let mut out: Vec<StaffMember> = staff
        .iter()
        .filter(|m| {
            needle.as_ref().is_none_or(|n| {
                m.name.to_lowercase().contains(n)
                    || m.id.to_lowercase().contains(n)
                    || m.working_area.to_lowercase().contains(n)
            })
        })
        .filter(|m| filter.status.is_none_or(|s| m.status == s))
        .cloned()
        .collect();

    out.sort_by(|a, b| {
        let ord = compare(a, b, filter.sort_by);
        match filter.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        }
    });
    out
}

pub fn staff_stats(staff: &[StaffMember]) -> StaffStats {
    let count = |s: StaffStatus| staff.iter().filter(|m| m.status == s).count();
    let ratings: Vec<f64> = staff.iter().map(|m| m.rating).collect();

    StaffStats {
        total: staff.len(),
        active: count(StaffStatus::Active),
        on_leave: count(StaffStatus::OnLeave),
        inactive: count(StaffStatus::Inactive),
        total_collections: staff.iter().map(|m| m.total_collections).sum(),
        average_rating: mean(&ratings),
    }
}
