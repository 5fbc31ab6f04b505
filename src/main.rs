//! Entry point: parse CLI and dispatch to command handlers.

use baseball_stats::{
    cli::{BaseballStats, Commands},
    commands::{dashboard::handle_dashboard, import_csvs::handle_import},
    Result,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Run the CLI.
fn main() -> Result<()> {
    // Logs go to stderr so `dashboard --json` output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let app = BaseballStats::parse();

    match app.command {
        Commands::Import { locations } => {
            handle_import(locations.config())?;
        }

        Commands::Dashboard {
            locations,
            filters,
            json,
        } => handle_dashboard(&locations.config(), filters.into_params(json))?,
    }

    Ok(())
}
