//! Import and dashboard configuration.
//!
//! The three (CSV file, table) pairs and their declared column types live
//! here. The importer casts columns to these types and the dashboard reads
//! tables back projected onto the same column lists.

use polars::prelude::DataType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CSV_DIR: &str = "data";
pub const DEFAULT_DB_PATH: &str = "baseball.db";

pub const BATTING_TABLE: &str = "batting_avg";
pub const HOME_RUNS_TABLE: &str = "home_runs";
pub const STRIKEOUTS_TABLE: &str = "career_strikeouts";

pub const NAME: &str = "Name";
pub const TEAM: &str = "Team";
pub const YEAR: &str = "Year";
pub const BATTING_AVERAGE: &str = "Batting_Average";
pub const CAREER_HOME_RUNS: &str = "Career_Home_Runs";
pub const LEAGUE: &str = "League";
pub const CAREER_STRIKEOUTS: &str = "Career_Strikeouts";
pub const CUMULATIVE: &str = "Cumulative";

/// Declared storage type for a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Text,
    Integer,
    Float,
}

impl ColumnType {
    /// Data frame type a column is cast to on import
    pub fn dtype(&self) -> DataType {
        match self {
            ColumnType::Text => DataType::String,
            ColumnType::Integer => DataType::Int64,
            ColumnType::Float => DataType::Float64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub ty: ColumnType,
}

impl ColumnSpec {
    pub fn new(name: &str, ty: ColumnType) -> Self {
        Self {
            name: name.to_string(),
            ty,
        }
    }
}

/// One source file and the table it replaces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub csv_name: String,
    pub table: String,
    pub columns: Vec<ColumnSpec>,
}

impl TableSpec {
    pub fn new(csv_name: &str, table: &str, columns: Vec<ColumnSpec>) -> Self {
        Self {
            csv_name: csv_name.to_string(),
            table: table.to_string(),
            columns,
        }
    }

    /// Expected column names, in declaration order
    pub fn expected_columns(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Declared type for `column`, if any
    pub fn declared_type(&self, column: &str) -> Option<ColumnType> {
        self.columns
            .iter()
            .find(|c| c.name == column)
            .map(|c| c.ty)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub csv_dir: PathBuf,
    pub db_path: PathBuf,
    pub tables: Vec<TableSpec>,
}

impl Config {
    /// Default table layout with custom locations
    pub fn new(csv_dir: impl Into<PathBuf>, db_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_dir: csv_dir.into(),
            db_path: db_path.into(),
            tables: default_tables(),
        }
    }

    pub fn table(&self, name: &str) -> Option<&TableSpec> {
        self.tables.iter().find(|t| t.table == name)
    }

    /// Expected columns for `name`; empty when the table is not configured
    pub fn expected_columns(&self, name: &str) -> Vec<String> {
        self.table(name)
            .map(TableSpec::expected_columns)
            .unwrap_or_default()
    }

    pub fn csv_path(&self, spec: &TableSpec) -> PathBuf {
        self.csv_dir.join(&spec.csv_name)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_CSV_DIR, DEFAULT_DB_PATH)
    }
}

fn default_tables() -> Vec<TableSpec> {
    use ColumnType::*;

    vec![
        TableSpec::new(
            "batting_avg.csv",
            BATTING_TABLE,
            vec![
                ColumnSpec::new(NAME, Text),
                ColumnSpec::new(TEAM, Text),
                ColumnSpec::new(YEAR, Integer),
                ColumnSpec::new(BATTING_AVERAGE, Float),
            ],
        ),
        TableSpec::new(
            "home_runs.csv",
            HOME_RUNS_TABLE,
            vec![
                ColumnSpec::new(NAME, Text),
                ColumnSpec::new(CAREER_HOME_RUNS, Integer),
            ],
        ),
        TableSpec::new(
            "career_strikeouts.csv",
            STRIKEOUTS_TABLE,
            vec![
                ColumnSpec::new(NAME, Text),
                ColumnSpec::new(LEAGUE, Text),
                ColumnSpec::new(CAREER_STRIKEOUTS, Integer),
            ],
        ),
    ]
}
