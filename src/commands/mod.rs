//! Command implementations for the baseball stats CLI

pub mod dashboard;
pub mod import_csvs;
pub mod render;
