use crate::core::aggregate::{mean_confidence, summarize};
use crate::core::shaping::shape_detection_at;
use crate::db::store::{DETECTIONS, Direction, DocumentStore, Query};
use crate::errors::{AppError, AppResult, passthrough_or};
use crate::models::{DetectionBatch, DetectionRecord, DetectionSummary};
use chrono::Utc;
use serde_json::Value;

/// Read side of the `model_results` collection.
pub struct DetectionService;

impl DetectionService {
    /// Every detection, newest first.
    pub fn fetch_all(store: &impl DocumentStore) -> AppResult<DetectionBatch> {
        Self::load(store, Self::newest_first())
    }

    /// The newest `page_size` detections.
    pub fn fetch_page(store: &impl DocumentStore, page_size: usize) -> AppResult<DetectionBatch> {
        Self::load(store, Self::newest_first().limit(page_size))
    }

    /// Detections with no staff member attached. A blank `staffId` counts as
    /// unassigned, so this is filtered on the shaped records.
    pub fn fetch_unassigned(store: &impl DocumentStore) -> AppResult<Vec<DetectionRecord>> {
        let mut records = Self::records(store, &Self::newest_first())?;
        records.retain(|r| !r.is_assigned());
        Ok(records)
    }

    pub fn get(store: &impl DocumentStore, id: &str) -> AppResult<DetectionRecord> {
        let doc = store
            .get(DETECTIONS, id)
            .map_err(|e| AppError::fetch_failed("detection", e))?
            .ok_or_else(|| AppError::not_found(DETECTIONS, id))?;

        Ok(shape_detection_at(&doc.id, &doc.data, Utc::now()))
    }

    pub fn summarize(records: &[DetectionRecord]) -> DetectionSummary {
        summarize(records)
    }

    /// Load raw detection documents. A string `id` field becomes the document
    /// id (and is replaced on re-import); others get a generated one.
    pub fn import(store: &impl DocumentStore, docs: &[Value]) -> AppResult<usize> {
        let mut imported = 0;

        for (n, doc) in docs.iter().enumerate() {
            let Some(obj) = doc.as_object() else {
                return Err(AppError::InvalidInput(format!(
                    "document #{} is not a JSON object",
                    n + 1
                )));
            };

            let result = match obj.get("id").and_then(Value::as_str) {
                Some(id) if !id.trim().is_empty() => {
                    let mut body = obj.clone();
                    body.remove("id");
                    store.put(DETECTIONS, id, &Value::Object(body))
                }
                _ => store.add(DETECTIONS, doc).map(|_| ()),
            };

            result.map_err(|e| passthrough_or(e, |e| AppError::update_failed("detections", e)))?;
            imported += 1;
        }

        Ok(imported)
    }

    pub(crate) fn records(store: &impl DocumentStore, q: &Query) -> AppResult<Vec<DetectionRecord>> {
        let docs = store
            .query(q)
            .map_err(|e| AppError::fetch_failed("detections", e))?;

        let now = Utc::now();
        Ok(docs
            .iter()
            .map(|d| shape_detection_at(&d.id, &d.data, now))
            .collect())
    }

    fn newest_first() -> Query {
        Query::collection(DETECTIONS).order_by("createdAt", Direction::Desc)
    }

    fn load(store: &impl DocumentStore, q: Query) -> AppResult<DetectionBatch> {
        let results = Self::records(store, &q)?;

        Ok(DetectionBatch {
            total_count: results.len(),
            average_confidence: mean_confidence(&results),
            last_updated: Utc::now(),
            results,
        })
    }
}
