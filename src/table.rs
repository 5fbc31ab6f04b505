//! Helpers shared by every layer that handles a polars [`DataFrame`].
//!
//! Tables move through the crate as data frames: the importer builds them
//! with the polars CSV reader, the store reads them back, and the views run
//! lazy queries over them. This module holds the small conversions around
//! that: column lookup with crate errors, projection onto an expected column
//! list, matching user selections against typed columns, and value
//! rendering for text and JSON output.

use crate::error::{Result, StatsError};
use polars::prelude::*;
use serde::ser::{Error as _, SerializeStruct};
use serde::Serializer;

/// A table with the given columns and no rows
pub fn empty_frame<S: AsRef<str>>(columns: &[S]) -> DataFrame {
    let series = columns
        .iter()
        .map(|c| Series::new_empty(c.as_ref(), &DataType::String))
        .collect();
    DataFrame::new(series).unwrap_or_else(|_| DataFrame::empty())
}

/// Keep the listed columns that exist, in the listed order
pub fn project<S: AsRef<str>>(frame: &DataFrame, columns: &[S]) -> DataFrame {
    let present: Vec<&str> = columns
        .iter()
        .map(AsRef::as_ref)
        .filter(|c| frame.column(c).is_ok())
        .collect();
    frame.select(present).unwrap_or_else(|_| DataFrame::empty())
}

pub fn has_column(frame: &DataFrame, name: &str) -> bool {
    frame.column(name).is_ok()
}

/// The named column, or a `MissingColumn` error
pub fn require_column<'a>(frame: &'a DataFrame, name: &str) -> Result<&'a Series> {
    frame.column(name).map_err(|_| StatsError::MissingColumn {
        column: name.to_string(),
    })
}

/// Predicate matching `column` against one user-supplied value.
///
/// The value is read according to the column's type, so `"2001"` matches an
/// integer `2001` and a float `2001.0`. Returns `None` when the value cannot
/// be read as that type and so matches nothing.
pub fn value_eq(column: &str, dtype: &DataType, value: &str) -> Option<Expr> {
    let trimmed = value.trim();
    if dtype.is_integer() {
        if let Ok(i) = trimmed.parse::<i64>() {
            return Some(col(column).eq(lit(i)));
        }
        trimmed
            .parse::<f64>()
            .ok()
            .map(|f| col(column).cast(DataType::Float64).eq(lit(f)))
    } else if dtype.is_float() {
        trimmed.parse::<f64>().ok().map(|f| col(column).eq(lit(f)))
    } else {
        Some(col(column).cast(DataType::String).eq(lit(value.to_string())))
    }
}

/// Predicate matching `column` against any of `values`
pub fn any_of(column: &str, dtype: &DataType, values: &[String]) -> Expr {
    values
        .iter()
        .filter_map(|v| value_eq(column, dtype, v))
        .reduce(|a, b| a.or(b))
        .unwrap_or_else(|| lit(false))
}

/// Values of row `idx`, one per column
pub fn row_values(frame: &DataFrame, idx: usize) -> PolarsResult<Vec<AnyValue<'_>>> {
    frame.get_columns().iter().map(|s| s.get(idx)).collect()
}

/// Plain text for a value; missing values are empty
pub fn value_to_string(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Int64(i) => i.to_string(),
        AnyValue::Float64(f) => format_float(*f),
        AnyValue::Float32(f) => format_float(f64::from(*f)),
        other => other.to_string(),
    }
}

fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 {
        format!("{:.1}", f)
    } else {
        f.to_string()
    }
}

pub fn value_to_json(value: &AnyValue) -> serde_json::Value {
    match value {
        AnyValue::Null => serde_json::Value::Null,
        AnyValue::Boolean(b) => serde_json::Value::Bool(*b),
        AnyValue::Int32(i) => serde_json::Value::Number((*i).into()),
        AnyValue::Int64(i) => serde_json::Value::Number((*i).into()),
        AnyValue::UInt32(u) => serde_json::Value::Number((*u).into()),
        AnyValue::UInt64(u) => serde_json::Value::Number((*u).into()),
        AnyValue::Float32(f) => float_to_json(f64::from(*f)),
        AnyValue::Float64(f) => float_to_json(*f),
        other => serde_json::Value::String(value_to_string(other)),
    }
}

fn float_to_json(f: f64) -> serde_json::Value {
    serde_json::Number::from_f64(f)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

/// Serialize a frame as `{"columns": [...], "rows": [[...], ...]}`
pub fn serialize_frame<S>(frame: &DataFrame, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut rows = Vec::with_capacity(frame.height());
    for idx in 0..frame.height() {
        let values = row_values(frame, idx).map_err(S::Error::custom)?;
        rows.push(values.iter().map(value_to_json).collect::<Vec<_>>());
    }

    let mut state = serializer.serialize_struct("Frame", 2)?;
    state.serialize_field("columns", &frame.get_column_names())?;
    state.serialize_field("rows", &rows)?;
    state.end()
}
