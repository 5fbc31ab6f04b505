//! CLI argument definitions and parsing.

use crate::{
    commands::dashboard::DashboardParams,
    config::{Config, DEFAULT_CSV_DIR, DEFAULT_DB_PATH},
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// File locations shared between commands
#[derive(Debug, Args)]
pub struct Locations {
    /// Directory holding batting_avg.csv, home_runs.csv and career_strikeouts.csv.
    #[clap(long, default_value = DEFAULT_CSV_DIR)]
    pub data_dir: PathBuf,

    /// SQLite database file.
    #[clap(long, default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,
}

impl Locations {
    pub fn config(&self) -> Config {
        Config::new(&self.data_dir, &self.db)
    }
}

/// Dashboard selections
#[derive(Debug, Args)]
pub struct DashboardFilters {
    /// Only show these years (repeatable): `--year 2001 --year 2002`. Default: all.
    #[clap(long = "year")]
    pub years: Vec<String>,

    /// Only show these teams (repeatable): `--team SEA --team NYY`. Default: all.
    #[clap(long = "team")]
    pub teams: Vec<String>,

    /// Minimum career home runs for the ranking (clamped to 0..=max, default min(100, max)).
    #[clap(long, allow_negative_numbers = true)]
    pub min_home_runs: Option<i64>,

    /// League for the cumulative strikeouts view. Default: first league.
    #[clap(long)]
    pub league: Option<String>,

    /// Player for the combined stats view. Default: first player.
    #[clap(long)]
    pub player: Option<String>,
}

impl DashboardFilters {
    pub fn into_params(self, as_json: bool) -> DashboardParams {
        DashboardParams {
            years: self.years,
            teams: self.teams,
            min_home_runs: self.min_home_runs,
            league: self.league,
            player: self.player,
            as_json,
        }
    }
}

#[derive(Debug, Parser)]
#[clap(
    name = "baseball-stats",
    about = "Baseball stats CSV importer and dashboard"
)]
pub struct BaseballStats {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load the CSV files into the database, replacing existing tables.
    Import {
        #[clap(flatten)]
        locations: Locations,
    },

    /// Show batting averages, home-run leaders, cumulative strikeouts and
    /// per-player stats from the database.
    Dashboard {
        #[clap(flatten)]
        locations: Locations,

        #[clap(flatten)]
        filters: DashboardFilters,

        /// Output results as JSON instead of text tables.
        #[clap(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_import_defaults() {
        let app = BaseballStats::try_parse_from(["baseball-stats", "import"]).unwrap();
        match app.command {
            Commands::Import { locations } => {
                assert_eq!(locations.data_dir, PathBuf::from("data"));
                assert_eq!(locations.db, PathBuf::from("baseball.db"));
            }
            _ => panic!("Expected Import command"),
        }
    }

    #[test]
    fn test_parse_dashboard_filters() {
        let app = BaseballStats::try_parse_from([
            "baseball-stats",
            "dashboard",
            "--db",
            "/tmp/stats.db",
            "--year",
            "2001",
            "--year",
            "2002",
            "--team",
            "SEA",
            "--min-home-runs",
            "250",
            "--league",
            "AL",
            "--player",
            "Ichiro Suzuki",
            "--json",
        ])
        .unwrap();

        match app.command {
            Commands::Dashboard {
                locations,
                filters,
                json,
            } => {
                assert!(json);
                assert_eq!(locations.db, PathBuf::from("/tmp/stats.db"));
                let params = filters.into_params(json);
                assert_eq!(params.years, vec!["2001", "2002"]);
                assert_eq!(params.teams, vec!["SEA"]);
                assert_eq!(params.min_home_runs, Some(250));
                assert_eq!(params.league.as_deref(), Some("AL"));
                assert_eq!(params.player.as_deref(), Some("Ichiro Suzuki"));
                assert!(params.as_json);
            }
            _ => panic!("Expected Dashboard command"),
        }
    }

    #[test]
    fn test_parse_negative_threshold() {
        let app = BaseballStats::try_parse_from([
            "baseball-stats",
            "dashboard",
            "--min-home-runs",
            "-5",
        ])
        .unwrap();
        match app.command {
            Commands::Dashboard { filters, .. } => assert_eq!(filters.min_home_runs, Some(-5)),
            _ => panic!("Expected Dashboard command"),
        }
    }

    #[test]
    fn test_locations_config() {
        let locations = Locations {
            data_dir: PathBuf::from("csvs"),
            db: PathBuf::from("out.db"),
        };
        let config = locations.config();
        assert_eq!(config.csv_dir, PathBuf::from("csvs"));
        assert_eq!(config.db_path, PathBuf::from("out.db"));
        assert_eq!(config.tables.len(), 3);
    }
}
