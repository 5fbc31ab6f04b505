//! Error types for the baseball stats importer and dashboard

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Data frame operation failed: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV directory not found: {}", path.display())]
    MissingSourceDir { path: PathBuf },

    #[error("Column not found: {column}")]
    MissingColumn { column: String },

    #[error("Non-numeric value {value:?} in column {column}")]
    NonNumeric { column: String, value: String },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}
