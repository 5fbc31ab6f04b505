//! Data access and view building for the dashboard.
//!
//! [`DashboardData::load`] performs the three tolerant reads. The remaining
//! functions are pure: they take those frames plus the user's selections and
//! return the tables the presentation layer renders.

pub mod controls;


use crate::{
    config::{
        Config, BATTING_AVERAGE, BATTING_TABLE, CAREER_HOME_RUNS, CAREER_STRIKEOUTS, CUMULATIVE,
        HOME_RUNS_TABLE, LEAGUE, NAME, STRIKEOUTS_TABLE, TEAM, YEAR,
    },
    error::{Result, StatsError},
    storage::StatsDatabase,
    table::{any_of, empty_frame, project, require_column, value_eq, value_to_string},
};
use polars::prelude::*;
use tracing::warn;

pub use controls::{
    available_leagues, available_players, available_teams, available_years, home_run_bounds,
    ThresholdRange,
};

/// Columns kept in the combined-player view, in output order
pub const COMBINED_COLUMNS: [&str; 4] = [YEAR, BATTING_AVERAGE, CAREER_HOME_RUNS, CAREER_STRIKEOUTS];

/// The three tables behind the dashboard
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub batting: DataFrame,
    pub home_runs: DataFrame,
    pub strikeouts: DataFrame,
}

impl DashboardData {
    /// Read all three tables. Never fails: an unreadable store or table
    /// yields empty frames with the expected columns.
    pub fn load(config: &Config) -> Self {
        match StatsDatabase::open_read_only(config.db_path()) {
            Ok(db) => Self::from_database(&db, config),
            Err(e) => {
                warn!(error = %e, "store unavailable, dashboard will be empty");
                Self::empty(config)
            }
        }
    }

    pub fn from_database(db: &StatsDatabase, config: &Config) -> Self {
        let read = |table: &str| db.read_tolerant(table, &config.expected_columns(table));
        Self {
            batting: read(BATTING_TABLE),
            home_runs: read(HOME_RUNS_TABLE),
            strikeouts: read(STRIKEOUTS_TABLE),
        }
    }

    pub fn empty(config: &Config) -> Self {
        Self {
            batting: empty_frame(&config.expected_columns(BATTING_TABLE)),
            home_runs: empty_frame(&config.expected_columns(HOME_RUNS_TABLE)),
            strikeouts: empty_frame(&config.expected_columns(STRIKEOUTS_TABLE)),
        }
    }
}

/// Batting rows restricted to the selected years and teams.
///
/// An empty selection does not filter on that column.
pub fn time_series(batting: &DataFrame, years: &[String], teams: &[String]) -> Result<DataFrame> {
    let mut predicates = Vec::new();
    for (column, selection) in [(YEAR, years), (TEAM, teams)] {
        if selection.is_empty() {
            continue;
        }
        let dtype = require_column(batting, column)?.dtype();
        predicates.push(any_of(column, dtype, selection));
    }

    let lazy = batting.clone().lazy();
    let filtered = match predicates.into_iter().reduce(|a, b| a.and(b)) {
        Some(predicate) => lazy.filter(predicate),
        None => lazy,
    };
    Ok(filtered.collect()?)
}

/// Home-run rows at or above `min_home_runs`, highest first.
///
/// Ties keep table order. Missing values never qualify; a non-numeric value
/// is an error.
pub fn home_run_ranking(home_runs: &DataFrame, min_home_runs: i64) -> Result<DataFrame> {
    ensure_numeric(require_column(home_runs, CAREER_HOME_RUNS)?)?;

    let ranked = home_runs
        .clone()
        .lazy()
        .filter(
            col(CAREER_HOME_RUNS)
                .cast(DataType::Float64)
                .gt_eq(lit(min_home_runs as f64)),
        )
        .sort(
            [CAREER_HOME_RUNS],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_nulls_last(true)
                .with_maintain_order(true),
        )
        .collect()?;
    Ok(ranked)
}

/// Strikeout rows for one league, sorted ascending, with a running total.
///
/// The `Cumulative` column holds the sum of `Career_Strikeouts` over that row
/// and every row before it. Missing values sort last, get a missing total and
/// leave the running sum unchanged. An integer total that would overflow is
/// summed as floats instead.
pub fn cumulative_strikeouts(strikeouts: &DataFrame, league: &str) -> Result<DataFrame> {
    let league_dtype = require_column(strikeouts, LEAGUE)?.dtype();
    require_column(strikeouts, CAREER_STRIKEOUTS)?;

    let in_league = value_eq(LEAGUE, league_dtype, league).unwrap_or_else(|| lit(false));
    let sorted = strikeouts
        .clone()
        .lazy()
        .filter(in_league)
        .sort(
            [CAREER_STRIKEOUTS],
            SortMultipleOptions::default()
                .with_nulls_last(true)
                .with_maintain_order(true),
        )
        .collect()?;

    let values = require_column(&sorted, CAREER_STRIKEOUTS)?;
    ensure_numeric(values)?;
    let total_dtype = if values.dtype().is_integer() && !fits_running_sum(values)? {
        DataType::Float64
    } else if values.dtype().is_numeric() {
        values.dtype().clone()
    } else {
        DataType::Float64
    };

    let with_totals = sorted
        .lazy()
        .with_column(
            col(CAREER_STRIKEOUTS)
                .cast(total_dtype)
                .cum_sum(false)
                .alias(CUMULATIVE),
        )
        .collect()?;
    Ok(with_totals)
}

fn fits_running_sum(values: &Series) -> Result<bool> {
    let ints = values.cast(&DataType::Int64)?;
    let fits = ints
        .i64()?
        .into_iter()
        .flatten()
        .try_fold(0i64, |total, v| total.checked_add(v))
        .is_some();
    Ok(fits)
}

/// Error on the first non-null value of a column that is not numeric
fn ensure_numeric(values: &Series) -> Result<()> {
    if values.dtype().is_numeric() || values.null_count() == values.len() {
        return Ok(());
    }
    let bad = values.drop_nulls().get(0).map(|v| value_to_string(&v))?;
    Err(StatsError::NonNumeric {
        column: values.name().to_string(),
        value: bad,
    })
}

/// Per-year stats for one player.
///
/// Every batting row for `player` is kept and left-joined with the home-run
/// and strikeout tables on `Name` (each join only when that table has rows).
/// Duplicate names on the right multiply rows and missing names never match.
/// The result keeps whichever of `Year`, `Batting_Average`,
/// `Career_Home_Runs` and `Career_Strikeouts` are present.
pub fn combined_player(
    batting: &DataFrame,
    home_runs: &DataFrame,
    strikeouts: &DataFrame,
    player: &str,
) -> Result<DataFrame> {
    let name_dtype = require_column(batting, NAME)?.dtype();
    let is_player = value_eq(NAME, name_dtype, player).unwrap_or_else(|| lit(false));

    let mut combined = batting.clone().lazy().filter(is_player);
    for right in [home_runs, strikeouts] {
        if right.height() == 0 {
            continue;
        }
        require_column(right, NAME)?;
        // join keys must share a type
        combined = combined
            .with_column(col(NAME).cast(DataType::String))
            .join(
                right.clone().lazy().with_column(col(NAME).cast(DataType::String)),
                [col(NAME)],
                [col(NAME)],
                JoinArgs::new(JoinType::Left),
            );
    }

    Ok(project(&combined.collect()?, &COMBINED_COLUMNS))
}
