//! Dashboard command implementation

use super::render::{print_section, print_selections};
use crate::{
    config::{Config, BATTING_TABLE, CAREER_HOME_RUNS, HOME_RUNS_TABLE, NAME, STRIKEOUTS_TABLE, YEAR},
    error::Result,
    table::{has_column, project, serialize_frame},
    views::{
        available_leagues, available_players, combined_player, cumulative_strikeouts,
        home_run_bounds, home_run_ranking, time_series, DashboardData,
    },
};
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::error;

/// User selections for the dashboard
#[derive(Debug, Clone, Default)]
pub struct DashboardParams {
    pub years: Vec<String>,
    pub teams: Vec<String>,
    pub min_home_runs: Option<i64>,
    pub league: Option<String>,
    pub player: Option<String>,
    pub as_json: bool,
}

/// What one dashboard section shows
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Section {
    /// Rows to display; `index` names the column that labels each row
    Table {
        #[serde(serialize_with = "serialize_frame")]
        frame: DataFrame,
        #[serde(skip_serializing_if = "Option::is_none")]
        index: Option<String>,
    },
    /// Nothing to show, with a note telling the user why
    Info { message: String },
    /// The view could not be built
    Error { message: String },
}

impl Section {
    fn table(frame: DataFrame) -> Self {
        Section::Table { frame, index: None }
    }

    fn info(message: impl Into<String>) -> Self {
        Section::Info {
            message: message.into(),
        }
    }

    fn failed(what: &str, err: impl std::fmt::Display) -> Self {
        let message = format!("Could not render {}: {}", what, err);
        error!("{}", message);
        Section::Error { message }
    }
}

/// Selections actually applied after defaults and clamping
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selections {
    pub years: Vec<String>,
    pub teams: Vec<String>,
    pub min_home_runs: Option<i64>,
    pub league: Option<String>,
    pub player: Option<String>,
}

/// Every section of a rendered dashboard
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub selections: Selections,
    pub batting_over_time: Section,
    pub top_home_runs: Section,
    pub strikeouts_by_league: Section,
    pub player_stats: Section,
}

/// Resolve defaults and build all four sections.
///
/// Each section is built on its own; a failure in one becomes an error
/// section and the rest still render.
pub fn build_dashboard(data: &DashboardData, params: &DashboardParams, config: &Config) -> Dashboard {
    let missing = |table: &str| {
        let csv = config
            .table(table)
            .map(|spec| config.csv_path(spec).display().to_string())
            .unwrap_or_else(|| table.to_string());
        format!("Ensure `{}` (or DB table) is loaded.", csv)
    };

    let min_home_runs = home_run_bounds(&data.home_runs).map(|range| {
        params
            .min_home_runs
            .map_or(range.default, |requested| range.clamp(requested))
    });
    let league = params
        .league
        .clone()
        .or_else(|| available_leagues(&data.strikeouts).into_iter().next());
    let player = params
        .player
        .clone()
        .or_else(|| available_players(&data.batting).into_iter().next());

    let batting_over_time = if data.batting.height() == 0 {
        Section::info(format!(
            "No batting average data found. {}",
            missing(BATTING_TABLE)
        ))
    } else {
        match time_series(&data.batting, &params.years, &params.teams) {
            Ok(frame) if frame.height() == 0 => {
                Section::info("No rows match the selected Year/Team filters.")
            }
            Ok(frame) => Section::table(frame),
            Err(e) => Section::failed("batting-average chart", e),
        }
    };

    let top_home_runs = match min_home_runs {
        Some(threshold) if data.home_runs.height() > 0 => {
            match home_run_ranking(&data.home_runs, threshold) {
                Ok(frame) if frame.height() == 0 => {
                    Section::info("No players meet the selected minimum career home runs.")
                }
                Ok(frame) => Section::table(project(&frame, &[NAME, CAREER_HOME_RUNS])),
                Err(e) => Section::failed("home-runs chart", e),
            }
        }
        _ => Section::info(format!("No home run data found. {}", missing(HOME_RUNS_TABLE))),
    };

    let strikeouts_by_league = match &league {
        Some(league) if data.strikeouts.height() > 0 => {
            match cumulative_strikeouts(&data.strikeouts, league) {
                Ok(frame) if frame.height() == 0 => {
                    Section::info(format!("No strikeout data for league '{}'.", league))
                }
                Ok(frame) => Section::table(frame),
                Err(e) => Section::failed("strikeouts chart", e),
            }
        }
        _ => Section::info(format!(
            "No career strikeouts data found. {}",
            missing(STRIKEOUTS_TABLE)
        )),
    };

    let player_stats = match &player {
        _ if data.batting.height() == 0 => {
            Section::info("Load batting data to use the player detail view.")
        }
        None => Section::info("No players available to select."),
        Some(name) => {
            match combined_player(&data.batting, &data.home_runs, &data.strikeouts, name) {
                Ok(frame) if frame.height() == 0 => {
                    Section::info("No combined stats found for this player.")
                }
                Ok(frame) => {
                    let index = has_column(&frame, YEAR).then(|| YEAR.to_string());
                    Section::Table { frame, index }
                }
                Err(e) => Section::failed("player stats", e),
            }
        }
    };

    Dashboard {
        selections: Selections {
            years: params.years.clone(),
            teams: params.teams.clone(),
            min_home_runs,
            league,
            player,
        },
        batting_over_time,
        top_home_runs,
        strikeouts_by_league,
        player_stats,
    }
}

/// Handle the dashboard command
pub fn handle_dashboard(config: &Config, params: DashboardParams) -> Result<()> {
    let data = DashboardData::load(config);
    let dashboard = build_dashboard(&data, &params, config);

    if params.as_json {
        println!("{}", serde_json::to_string_pretty(&dashboard)?);
        return Ok(());
    }

    println!("Baseball Stats Dashboard");
    print_selections(&dashboard.selections);
    print_section("Batting Average Over Time by Team", &dashboard.batting_over_time);
    print_section("Top Career Home Run Hitters", &dashboard.top_home_runs);
    print_section(
        "Career Strikeouts by League (Cumulative)",
        &dashboard.strikeouts_by_league,
    );
    print_section("Combined Stats for a Player", &dashboard.player_stats);

    Ok(())
}
