//! Conversions between data frame columns and SQLite values

use polars::prelude::*;
use rusqlite::types::Value;

/// SQLite column affinity for a data frame column type
pub fn sql_type(dtype: &DataType) -> &'static str {
    if dtype.is_integer() || matches!(dtype, DataType::Boolean) {
        "INTEGER"
    } else if dtype.is_float() {
        "REAL"
    } else {
        "TEXT"
    }
}

/// SQLite value for one data frame value
pub fn to_sql_value(value: &AnyValue) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Integer(i64::from(*b)),
        AnyValue::Int32(i) => Value::Integer(i64::from(*i)),
        AnyValue::Int64(i) => Value::Integer(*i),
        AnyValue::UInt32(u) => Value::Integer(i64::from(*u)),
        // SQLite stores NaN as NULL anyway
        AnyValue::Float64(f) if f.is_nan() => Value::Null,
        AnyValue::Float64(f) => Value::Real(*f),
        AnyValue::Float32(f) => Value::Real(f64::from(*f)),
        other => Value::Text(crate::table::value_to_string(other)),
    }
}

/// Build a column from stored values.
///
/// The column type follows what SQLite actually holds: integers only give
/// an integer column, integers mixed with reals give a float column, and any
/// text makes the whole column text. A column with no values at all takes
/// the type it was declared with.
pub fn series_from_values(name: &str, values: Vec<Value>, declared: &str) -> Series {
    let (mut ints, mut reals, mut text) = (false, false, false);
    for value in &values {
        match value {
            Value::Integer(_) => ints = true,
            Value::Real(_) => reals = true,
            Value::Text(_) | Value::Blob(_) => text = true,
            Value::Null => {}
        }
    }

    let dtype = if text {
        DataType::String
    } else if reals {
        DataType::Float64
    } else if ints {
        DataType::Int64
    } else {
        declared_dtype(declared)
    };

    match dtype {
        DataType::Int64 => {
            let col: Vec<Option<i64>> = values
                .into_iter()
                .map(|v| match v {
                    Value::Integer(i) => Some(i),
                    _ => None,
                })
                .collect();
            Series::new(name, col)
        }
        DataType::Float64 => {
            let col: Vec<Option<f64>> = values
                .into_iter()
                .map(|v| match v {
                    Value::Integer(i) => Some(i as f64),
                    Value::Real(f) => Some(f),
                    _ => None,
                })
                .collect();
            Series::new(name, col)
        }
        _ => {
            let col: Vec<Option<String>> = values
                .into_iter()
                .map(|v| match v {
                    Value::Null => None,
                    Value::Integer(i) => Some(i.to_string()),
                    Value::Real(f) => Some(f.to_string()),
                    Value::Text(s) => Some(s),
                    Value::Blob(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
                })
                .collect();
            Series::new(name, col)
        }
    }
}

fn declared_dtype(declared: &str) -> DataType {
    match declared.to_ascii_uppercase().as_str() {
        "INTEGER" => DataType::Int64,
        "REAL" => DataType::Float64,
        _ => DataType::String,
    }
}
