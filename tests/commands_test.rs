//! Integration tests for command handlers

use baseball_stats::{
    commands::{
        dashboard::{build_dashboard, handle_dashboard, DashboardParams, Section},
        import_csvs::handle_import,
    },
    config::{CAREER_HOME_RUNS, CUMULATIVE},
    views::DashboardData,
    Config,
};
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, Config) {
    let dir = TempDir::new().unwrap();
    let csv_dir = dir.path().join("data");
    fs::create_dir(&csv_dir).unwrap();
    fs::write(
        csv_dir.join("batting_avg.csv"),
        "Name,Team,Year,Batting Average\n\
         Ichiro Suzuki,SEA,2001,0.350\n\
         Ichiro Suzuki,SEA,2002,0.321\n\
         Barry Bonds,SF,2001,0.328\n",
    )
    .unwrap();
    fs::write(
        csv_dir.join("home_runs.csv"),
        "Name,Career Home Runs\nIchiro Suzuki,117\nBarry Bonds,762\nHank Aaron,755\n",
    )
    .unwrap();
    fs::write(
        csv_dir.join("career_strikeouts.csv"),
        "Name,League,Career Strikeouts\nA,AL,40\nB,AL,10\nC,AL,25\nD,NL,3\n",
    )
    .unwrap();
    let config = Config::new(&csv_dir, dir.path().join("baseball.db"));
    (dir, config)
}

#[test]
fn test_import_then_dashboard() {
    let (_dir, config) = setup();
    let report = handle_import(config.clone()).unwrap();
    assert_eq!(report.tables.len(), 3);

    let data = DashboardData::load(&config);
    let dashboard = build_dashboard(&data, &DashboardParams::default(), &config);

    match &dashboard.top_home_runs {
        Section::Table { frame, .. } => {
            let values: Vec<Option<i64>> = frame
                .column(CAREER_HOME_RUNS)
                .unwrap()
                .i64()
                .unwrap()
                .into_iter()
                .collect();
            assert_eq!(values, vec![Some(762), Some(755), Some(117)]);
        }
        other => panic!("Expected table, got {:?}", other),
    }

    match &dashboard.strikeouts_by_league {
        Section::Table { frame, .. } => {
            let totals: Vec<Option<i64>> = frame
                .column(CUMULATIVE)
                .unwrap()
                .i64()
                .unwrap()
                .into_iter()
                .collect();
            assert_eq!(totals, vec![Some(10), Some(35), Some(75)]);
        }
        other => panic!("Expected table, got {:?}", other),
    }

    // first player alphabetically
    assert_eq!(dashboard.selections.player.as_deref(), Some("Barry Bonds"));
    match &dashboard.player_stats {
        Section::Table { frame, index } => {
            assert_eq!(frame.height(), 1);
            assert_eq!(index.as_deref(), Some("Year"));
        }
        other => panic!("Expected table, got {:?}", other),
    }
}

#[test]
fn test_dashboard_player_selection() {
    let (_dir, config) = setup();
    handle_import(config.clone()).unwrap();

    let params = DashboardParams {
        player: Some("Ichiro Suzuki".to_string()),
        ..Default::default()
    };
    let dashboard = build_dashboard(&DashboardData::load(&config), &params, &config);

    match &dashboard.player_stats {
        Section::Table { frame, .. } => {
            assert_eq!(frame.height(), 2);
            assert_eq!(frame.column("Career_Strikeouts").unwrap().null_count(), 2);
            let home_runs: Vec<Option<i64>> = frame
                .column("Career_Home_Runs")
                .unwrap()
                .i64()
                .unwrap()
                .into_iter()
                .collect();
            assert_eq!(home_runs, vec![Some(117), Some(117)]);
        }
        other => panic!("Expected table, got {:?}", other),
    }
}

#[test]
fn test_handle_dashboard_without_store() {
    let dir = TempDir::new().unwrap();
    let config = Config::new(dir.path(), dir.path().join("missing.db"));

    let text = handle_dashboard(&config, DashboardParams::default());
    assert!(text.is_ok());

    let json = handle_dashboard(
        &config,
        DashboardParams {
            as_json: true,
            ..Default::default()
        },
    );
    assert!(json.is_ok());
}

#[test]
fn test_handle_import_missing_directory() {
    let dir = TempDir::new().unwrap();
    let config = Config::new(dir.path().join("absent"), dir.path().join("baseball.db"));
    assert!(handle_import(config).is_err());
}
