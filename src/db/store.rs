//! Document store capability.
//!
//! The services only ever talk to a [`DocumentStore`]: a collection of schemaless
//! JSON documents that can be scanned with equality / inequality filters, a
//! single-field ordering and a result limit, plus add / update / delete / get by
//! identifier. [`DbPool`] implements it on top of SQLite, one row per document.

use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use chrono::Utc;
use regex::Regex;
use rusqlite::types::Value as SqlValue;
use rusqlite::{OptionalExtension, Row, params, params_from_iter};
use serde_json::{Map, Value};
use std::sync::LazyLock;
use uuid::Uuid;

/// Detection events written by the detection model.
pub const DETECTIONS: &str = "model_results";
/// Worker roster.
pub const STAFF: &str = "staff";

static FIELD_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("field path pattern is valid")
});

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn as_sql(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Field equals value. `Eq(field, Null)` also matches a missing field.
    Eq(String, Value),
    /// Field is present and differs from value.
    Ne(String, Value),
    /// Field is present and not null.
    NotNull(String),
}

impl Filter {
    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Filter::Eq(field.to_string(), value.into())
    }

    pub fn ne(field: &str, value: impl Into<Value>) -> Self {
        Filter::Ne(field.to_string(), value.into())
    }

    pub fn not_null(field: &str) -> Self {
        Filter::NotNull(field.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub collection: String,
    pub filters: Vec<Filter>,
    pub order: Option<(String, Direction)>,
    pub limit: Option<usize>,
}

impl Query {
    pub fn collection(name: &str) -> Self {
        Self {
            collection: name.to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, field: &str, direction: Direction) -> Self {
        self.order = Some((field.to_string(), direction));
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }
}

pub trait DocumentStore {
    fn query(&self, query: &Query) -> AppResult<Vec<Document>>;

    fn get(&self, collection: &str, id: &str) -> AppResult<Option<Document>>;

    /// Insert a new document under a generated identifier.
    fn add(&self, collection: &str, data: &Value) -> AppResult<String>;

    /// Create or replace the document stored under `id`.
    fn put(&self, collection: &str, id: &str, data: &Value) -> AppResult<()>;

    /// Shallow-merge `patch` into an existing document.
    fn update(&self, collection: &str, id: &str, patch: &Value) -> AppResult<()>;

    fn delete(&self, collection: &str, id: &str) -> AppResult<()>;
}

fn json_path(field: &str) -> AppResult<String> {
    if !FIELD_PATH.is_match(field) {
        return Err(AppError::InvalidQuery(format!("invalid field path '{field}'")));
    }
    Ok(format!("json_extract(body, '$.{field}')"))
}

/// JSON scalar → SQLite value as `json_extract` would return it.
/// `None` stands for JSON null.
fn to_sql_value(v: &Value) -> AppResult<Option<SqlValue>> {
    match v {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(SqlValue::Integer(i64::from(*b)))),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(Some(SqlValue::Integer(i))),
            None => Ok(Some(SqlValue::Real(n.as_f64().unwrap_or(0.0)))),
        },
        Value::String(s) => Ok(Some(SqlValue::Text(s.clone()))),
        Value::Array(_) | Value::Object(_) => Err(AppError::InvalidQuery(
            "filters only compare scalar values".into(),
        )),
    }
}

pub(crate) fn build_sql(query: &Query) -> AppResult<(String, Vec<SqlValue>)> {
    let mut sql = String::from("SELECT id, body FROM documents WHERE collection = ?1");
    let mut binds = vec![SqlValue::Text(query.collection.clone())];

    for filter in &query.filters {
        match filter {
            Filter::Eq(field, value) => {
                let expr = json_path(field)?;
                match to_sql_value(value)? {
                    None => sql.push_str(&format!(" AND {expr} IS NULL")),
                    Some(v) => {
                        binds.push(v);
                        sql.push_str(&format!(" AND {expr} = ?{}", binds.len()));
                    }
                }
            }
            Filter::Ne(field, value) => {
                let expr = json_path(field)?;
                sql.push_str(&format!(" AND {expr} IS NOT NULL"));
                if let Some(v) = to_sql_value(value)? {
                    binds.push(v);
                    sql.push_str(&format!(" AND {expr} != ?{}", binds.len()));
                }
            }
            Filter::NotNull(field) => {
                let expr = json_path(field)?;
                sql.push_str(&format!(" AND {expr} IS NOT NULL"));
            }
        }
    }

    match &query.order {
        Some((field, direction)) => {
            let expr = json_path(field)?;
            // documents lacking the field go last in both directions
            sql.push_str(&format!(
                " ORDER BY ({expr} IS NULL) ASC, {expr} {}, id ASC",
                direction.as_sql()
            ));
        }
        None => sql.push_str(" ORDER BY created_at ASC, id ASC"),
    }

    if let Some(n) = query.limit {
        sql.push_str(&format!(" LIMIT {n}"));
    }

    Ok((sql, binds))
}

fn map_document(row: &Row) -> rusqlite::Result<(String, String)> {
    Ok((row.get("id")?, row.get("body")?))
}

fn parse_document((id, body): (String, String)) -> AppResult<Document> {
    let data = serde_json::from_str(&body)?;
    Ok(Document { id, data })
}

fn require_object<'a>(data: &'a Value, what: &str) -> AppResult<&'a Map<String, Value>> {
    data.as_object()
        .ok_or_else(|| AppError::InvalidInput(format!("{what} must be a JSON object")))
}

impl DocumentStore for DbPool {
    fn query(&self, query: &Query) -> AppResult<Vec<Document>> {
        let (sql, binds) = build_sql(query)?;
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(binds), map_document)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(parse_document(r?)?);
        }
        Ok(out)
    }

    fn get(&self, collection: &str, id: &str) -> AppResult<Option<Document>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, body FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection, id],
                map_document,
            )
            .optional()?;

        row.map(parse_document).transpose()
    }

    fn add(&self, collection: &str, data: &Value) -> AppResult<String> {
        require_object(data, "document")?;
        let id = Uuid::new_v4().simple().to_string();
        let now = Utc::now().to_rfc3339();

        self.conn.execute(
            "INSERT INTO documents (collection, id, body, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![collection, id, serde_json::to_string(data)?, now],
        )?;

        Ok(id)
    }

    fn put(&self, collection: &str, id: &str, data: &Value) -> AppResult<()> {
        require_object(data, "document")?;
        if id.trim().is_empty() {
            return Err(AppError::InvalidInput("document id cannot be empty".into()));
        }
        let now = Utc::now().to_rfc3339();

        self.conn.execute(
            "INSERT INTO documents (collection, id, body, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             ON CONFLICT(collection, id)
             DO UPDATE SET body = excluded.body, updated_at = excluded.updated_at",
            params![collection, id, serde_json::to_string(data)?, now],
        )?;

        Ok(())
    }

    fn update(&self, collection: &str, id: &str, patch: &Value) -> AppResult<()> {
        let patch = require_object(patch, "update")?;

        let tx = self.conn.unchecked_transaction()?;

        let body: Option<String> = tx
            .query_row(
                "SELECT body FROM documents WHERE collection = ?1 AND id = ?2",
                params![collection, id],
                |row| row.get(0),
            )
            .optional()?;

        let Some(body) = body else {
            return Err(AppError::not_found(collection, id));
        };

        let mut current: Value = serde_json::from_str(&body)?;
        if let Some(obj) = current.as_object_mut() {
            for (k, v) in patch {
                obj.insert(k.clone(), v.clone());
            }
        }

        tx.execute(
            "UPDATE documents SET body = ?1, updated_at = ?2
             WHERE collection = ?3 AND id = ?4",
            params![
                serde_json::to_string(&current)?,
                Utc::now().to_rfc3339(),
                collection,
                id
            ],
        )?;
        tx.commit()?;

        Ok(())
    }

    fn delete(&self, collection: &str, id: &str) -> AppResult<()> {
        let n = self.conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2",
            params![collection, id],
        )?;

        if n == 0 {
            return Err(AppError::not_found(collection, id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store_with(docs: &[(&str, Value)]) -> DbPool {
        let pool = DbPool::in_memory().unwrap();
        for (id, body) in docs {
            pool.put(DETECTIONS, id, body).unwrap();
        }
        pool
    }

    fn ids(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d.id.as_str()).collect()
    }

    #[test]
    fn equality_filter_matches_strings() {
        let pool = store_with(&[
            ("a", json!({"staffId": "s1"})),
            ("b", json!({"staffId": "s2"})),
            ("c", json!({})),
        ]);

        let q = Query::collection(DETECTIONS).filter(Filter::eq("staffId", "s1"));
        assert_eq!(ids(&pool.query(&q).unwrap()), vec!["a"]);
    }

    #[test]
    fn not_null_excludes_missing_and_null_fields() {
        let pool = store_with(&[
            ("a", json!({"staffId": "s1"})),
            ("b", json!({"staffId": null})),
            ("c", json!({})),
        ]);

        let q = Query::collection(DETECTIONS).filter(Filter::not_null("staffId"));
        assert_eq!(ids(&pool.query(&q).unwrap()), vec!["a"]);

        let q = Query::collection(DETECTIONS).filter(Filter::eq("staffId", Value::Null));
        assert_eq!(ids(&pool.query(&q).unwrap()), vec!["b", "c"]);
    }

    #[test]
    fn ordering_puts_missing_fields_last_and_limit_applies() {
        let pool = store_with(&[
            ("old", json!({"createdAt": "2025-01-01T00:00:00Z"})),
            ("none", json!({})),
            ("new", json!({"createdAt": "2025-03-01T00:00:00Z"})),
        ]);

        let q = Query::collection(DETECTIONS).order_by("createdAt", Direction::Desc);
        assert_eq!(ids(&pool.query(&q).unwrap()), vec!["new", "old", "none"]);

        let q = q.limit(1);
        assert_eq!(ids(&pool.query(&q).unwrap()), vec!["new"]);
    }

    #[test]
    fn update_merges_top_level_fields() {
        let pool = store_with(&[("a", json!({"address": "X", "workStatus": "pending"}))]);

        pool.update(DETECTIONS, "a", &json!({"workStatus": "completed"}))
            .unwrap();

        let doc = pool.get(DETECTIONS, "a").unwrap().unwrap();
        assert_eq!(doc.data, json!({"address": "X", "workStatus": "completed"}));
    }

    #[test]
    fn update_and_delete_report_missing_documents() {
        let pool = store_with(&[]);
        assert!(pool.update(DETECTIONS, "nope", &json!({"a": 1})).unwrap_err().is_not_found());
        assert!(pool.delete(DETECTIONS, "nope").unwrap_err().is_not_found());
    }

    #[test]
    fn collections_are_isolated() {
        let pool = store_with(&[("a", json!({"name": "x"}))]);
        let id = pool.add(STAFF, &json!({"name": "y"})).unwrap();

        assert!(pool.get(DETECTIONS, &id).unwrap().is_none());
        assert_eq!(pool.query(&Query::collection(STAFF)).unwrap().len(), 1);
    }

    #[test]
    fn field_paths_are_validated() {
        let q = Query::collection(DETECTIONS).filter(Filter::eq("x') OR 1=1 --", "y"));
        assert!(matches!(build_sql(&q), Err(AppError::InvalidQuery(_))));

        let q = Query::collection(DETECTIONS).filter(Filter::eq("location.address", "y"));
        assert!(build_sql(&q).is_ok());
    }

    #[test]
    fn non_object_documents_are_rejected() {
        let pool = store_with(&[]);
        assert!(matches!(
            pool.add(DETECTIONS, &json!([1, 2])),
            Err(AppError::InvalidInput(_))
        ));
    }
}
