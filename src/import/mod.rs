//! CSV importer.
//!
//! Reads each configured CSV file with the polars CSV reader, normalizes its
//! headers, applies the declared column types where every value fits, and
//! replaces the matching table in the store. A missing file skips that one
//! table; a missing CSV directory aborts the whole run before the store is
//! touched.


use crate::{
    config::{ColumnType, Config, TableSpec},
    error::{Result, StatsError},
    storage::StatsDatabase,
    table::value_to_string,
};
use csv::ReaderBuilder;
use polars::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Field values read as missing, besides the empty field
const NULL_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Result of importing one (file, table) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ImportOutcome {
    Loaded {
        csv_name: String,
        table: String,
        rows: usize,
    },
    Skipped {
        table: String,
        path: PathBuf,
    },
}

/// Summary of a full import run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportReport {
    pub outcomes: Vec<ImportOutcome>,
    /// Every table present in the store after the run
    pub tables: Vec<String>,
}

/// A value that kept a column from taking its declared type
#[derive(Debug, Clone, PartialEq)]
pub struct CastFailure {
    pub target: ColumnType,
    pub value: String,
}

/// Trim a header and replace its spaces with underscores
pub fn normalize_column_name(name: &str) -> String {
    name.trim().replace(' ', "_")
}

/// Normalize headers and make them unique.
///
/// Blank headers are named `Unnamed: <position>` first; repeated names get
/// `.1`, `.2`, ... suffixes in order of appearance.
pub fn normalize_headers<S: AsRef<str>>(headers: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    headers
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let raw = raw.as_ref();
            let base = if raw.trim().is_empty() {
                normalize_column_name(&format!("Unnamed: {}", i))
            } else {
                normalize_column_name(raw)
            };

            let mut name = base.clone();
            let mut n = 1;
            while !seen.insert(name.clone()) {
                name = format!("{}.{}", base, n);
                n += 1;
            }
            name
        })
        .collect()
}

fn read_headers(path: &Path) -> Result<Vec<String>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    Ok(rdr.headers()?.iter().map(String::from).collect())
}

/// Parse a CSV file into a data frame.
///
/// Column types are inferred over the whole file. Short records are padded
/// with nulls and extra fields are dropped. Declared types from `spec` are
/// then applied column by column; a column with any value that does not fit
/// keeps its inferred type and values.
pub fn read_csv(path: &Path, spec: &TableSpec) -> Result<DataFrame> {
    let headers = normalize_headers(&read_headers(path)?);

    let null_values = NULL_VALUES.iter().map(|s| s.to_string()).collect();
    let mut frame = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_null_values(Some(NullValues::AllColumns(null_values)))
        .with_truncate_ragged_lines(true)
        .finish()?
        .collect()?;
    frame.set_column_names(&headers)?;

    Ok(apply_declared_types(frame, spec))
}

/// Cast `series` to `target`, failing on the first non-null value that would
/// be lost or changed.
///
/// Floats become integers only when every value is integral and inside the
/// `i64` range. Missing values always fit.
pub fn cast_declared(series: &Series, target: ColumnType) -> std::result::Result<Series, CastFailure> {
    let fail = |value: String| CastFailure { target, value };

    if target == ColumnType::Integer && series.dtype().is_float() {
        let floats = series
            .cast(&DataType::Float64)
            .map_err(|e| fail(e.to_string()))?;
        let floats = floats.f64().map_err(|e| fail(e.to_string()))?;
        let bad = floats.into_iter().flatten().find(|f| !fits_i64(*f));
        if let Some(bad) = bad {
            return Err(fail(bad.to_string()));
        }
    }

    let cast = series
        .cast(&target.dtype())
        .map_err(|e| fail(e.to_string()))?;
    let lost = &series.is_not_null() & &cast.is_null();
    let lost_idx = lost.into_iter().position(|v| v == Some(true));
    match lost_idx {
        Some(idx) => Err(fail(
            series.get(idx).map(|v| value_to_string(&v)).unwrap_or_default(),
        )),
        None => Ok(cast),
    }
}

fn fits_i64(f: f64) -> bool {
    f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64
}

fn apply_declared_types(mut frame: DataFrame, spec: &TableSpec) -> DataFrame {
    for column in &spec.columns {
        let cast = match frame.column(&column.name) {
            Ok(series) if series.dtype() != &column.ty.dtype() => cast_declared(series, column.ty),
            _ => continue,
        };

        match cast {
            Ok(series) => {
                if let Err(e) = frame.with_column(series) {
                    warn!(table = %spec.table, column = %column.name, error = %e, "could not replace column");
                }
            }
            Err(failure) => debug!(
                table = %spec.table,
                column = %column.name,
                target = ?failure.target,
                value = %failure.value,
                "cast failed, keeping inferred column type"
            ),
        }
    }
    frame
}

/// Loads the configured CSV files into the store
pub struct Importer {
    config: Config,
}

impl Importer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Import every configured table, then list the store's tables
    pub fn run(&self) -> Result<ImportReport> {
        let csv_dir = &self.config.csv_dir;
        if !csv_dir.is_dir() {
            return Err(StatsError::MissingSourceDir {
                path: csv_dir.clone(),
            });
        }

        let mut db = StatsDatabase::open(self.config.db_path())?;
        let mut outcomes = Vec::with_capacity(self.config.tables.len());
        for spec in &self.config.tables {
            outcomes.push(self.import_one(&mut db, spec)?);
        }

        let tables = db.table_names()?;
        info!(?tables, "tables in store");
        Ok(ImportReport { outcomes, tables })
    }

    /// Import one (file, table) pair, replacing the table wholesale
    pub fn import_one(&self, db: &mut StatsDatabase, spec: &TableSpec) -> Result<ImportOutcome> {
        let path = self.config.csv_path(spec);
        if !path.exists() {
            warn!(table = %spec.table, path = %path.display(), "skipping table: CSV not found");
            return Ok(ImportOutcome::Skipped {
                table: spec.table.clone(),
                path,
            });
        }

        let frame = read_csv(&path, spec)?;
        db.replace_table(&spec.table, &frame)?;

        info!(
            csv = %spec.csv_name,
            table = %spec.table,
            rows = frame.height(),
            "loaded CSV into table"
        );
        Ok(ImportOutcome::Loaded {
            csv_name: spec.csv_name.clone(),
            table: spec.table.clone(),
            rows: frame.height(),
        })
    }
}
