//! Unified application error type.
//! All modules (db, core, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.

use std::fmt::Display;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Document '{id}' not found in '{collection}'")]
    NotFound { collection: String, id: String },

    // ---------------------------
    // Serialization
    // ---------------------------
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Parsing / validation errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ---------------------------
    // Service boundary failures
    // ---------------------------
    #[error("Failed to fetch {0}")]
    Fetch(String),

    #[error("Failed to update {0}")]
    Update(String),

    #[error("Failed to delete {0}")]
    Delete(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export format not supported: {0}")]
    InvalidExportFormat(String),

    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Collapse a store failure into the generic "failed to fetch" condition.
    /// The original error only goes to the diagnostic log.
    pub fn fetch_failed<E: Display>(what: &str, err: E) -> Self {
        log::error!("Error fetching {what}: {err}");
        AppError::Fetch(what.to_string())
    }

    pub fn update_failed<E: Display>(what: &str, err: E) -> Self {
        log::error!("Error updating {what}: {err}");
        AppError::Update(what.to_string())
    }

    pub fn delete_failed<E: Display>(what: &str, err: E) -> Self {
        log::error!("Error deleting {what}: {err}");
        AppError::Delete(what.to_string())
    }

    pub fn not_found(collection: &str, id: &str) -> Self {
        AppError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound { .. })
    }
}

/// Map a store error at a service boundary: `NotFound` and validation errors
/// reach the caller as they are, everything else becomes the generic condition.
pub(crate) fn passthrough_or(err: AppError, generic: impl FnOnce(AppError) -> AppError) -> AppError {
    match err {
        AppError::NotFound { .. } | AppError::InvalidInput(_) | AppError::InvalidStatus(_) => err,
        other => generic(other),
    }
}
