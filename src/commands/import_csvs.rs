//! Import command implementation

use crate::{
    config::Config,
    import::{ImportOutcome, ImportReport, Importer},
    Result,
};

/// Handle the import command
pub fn handle_import(config: Config) -> Result<ImportReport> {
    println!(
        "Importing CSV files from {} into {}...",
        config.csv_dir.display(),
        config.db_path().display()
    );

    let report = Importer::new(config).run()?;

    for outcome in &report.outcomes {
        match outcome {
            ImportOutcome::Loaded {
                csv_name,
                table,
                rows,
            } => println!("✓ Loaded {} -> table '{}' ({} rows)", csv_name, table, rows),
            ImportOutcome::Skipped { table, path } => {
                println!("⚠ Skipping {}: CSV not found at {}", table, path.display())
            }
        }
    }
    println!("Tables in DB: {}", report.tables.join(", "));

    Ok(report)
}
