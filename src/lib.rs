//! Baseball Stats Library
//!
//! Imports three baseball CSV snapshots (batting average, career home runs,
//! career strikeouts) into a local SQLite store and builds the filtered
//! views a stats dashboard renders from them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use baseball_stats::{config::Config, import::Importer, views::*};
//!
//! # fn example() -> baseball_stats::Result<()> {
//! let config = Config::default();
//! Importer::new(config.clone()).run()?;
//!
//! let data = DashboardData::load(&config);
//! let top_hitters = home_run_ranking(&data.home_runs, 500)?;
//! println!("{} players with 500+ home runs", top_hitters.height());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod import;
pub mod storage;
pub mod table;
pub mod views;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, StatsError};
