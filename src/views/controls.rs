//! Choices offered to the user for each view, derived from the loaded data.

use crate::config::{CAREER_HOME_RUNS, LEAGUE, NAME, TEAM, YEAR};
use crate::table::value_to_string;
use polars::prelude::*;
use serde::Serialize;
use tracing::warn;

/// Default home-run threshold when the data allows it
pub const DEFAULT_MIN_HOME_RUNS: i64 = 100;

pub fn available_years(batting: &DataFrame) -> Vec<String> {
    distinct_sorted(batting, YEAR)
}

pub fn available_teams(batting: &DataFrame) -> Vec<String> {
    distinct_sorted(batting, TEAM)
}

pub fn available_leagues(strikeouts: &DataFrame) -> Vec<String> {
    distinct_sorted(strikeouts, LEAGUE)
}

pub fn available_players(batting: &DataFrame) -> Vec<String> {
    distinct_sorted(batting, NAME)
}

/// Distinct non-null values of a column, sorted by the column's type (so
/// years sort numerically). Empty when the column is absent.
fn distinct_sorted(frame: &DataFrame, column: &str) -> Vec<String> {
    if frame.column(column).is_err() {
        return Vec::new();
    }

    let distinct = frame
        .clone()
        .lazy()
        .select([col(column)])
        .drop_nulls(None)
        .unique(None, UniqueKeepStrategy::Any)
        .sort([column], SortMultipleOptions::default())
        .collect();

    match distinct {
        Ok(values) => values
            .column(column)
            .map(|s| {
                (0..s.len())
                    .filter_map(|i| s.get(i).ok())
                    .map(|v| value_to_string(&v))
                    .collect()
            })
            .unwrap_or_default(),
        Err(e) => {
            warn!(column, error = %e, "could not list choices");
            Vec::new()
        }
    }
}

/// Bounds and default for the home-run threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThresholdRange {
    pub min: i64,
    pub max: i64,
    pub default: i64,
}

impl ThresholdRange {
    /// Range `0..=max`. The default never leaves the range, even when every
    /// value in the data is negative.
    pub fn new(max: i64) -> Self {
        Self {
            min: 0,
            max,
            default: DEFAULT_MIN_HOME_RUNS.min(max).max(0),
        }
    }

    /// Pull a requested threshold into range
    pub fn clamp(&self, value: i64) -> i64 {
        value.max(self.min).min(self.max.max(self.min))
    }
}

/// Threshold range for the ranking view, or `None` when there is nothing to
/// rank (no rows, no home-run column, or no numeric values).
pub fn home_run_bounds(home_runs: &DataFrame) -> Option<ThresholdRange> {
    if home_runs.height() == 0 {
        return None;
    }
    let values = home_runs.column(CAREER_HOME_RUNS).ok()?;
    if !values.dtype().is_numeric() {
        return None;
    }

    let floats = values.cast(&DataType::Float64).ok()?;
    let max = floats
        .f64()
        .ok()?
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .reduce(f64::max)?;

    Some(ThresholdRange::new(max as i64))
}
