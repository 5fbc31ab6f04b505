//! Storage layer for the baseball stats tables
//!
//! This module wraps the SQLite store holding the imported tables:
//! - `models`: Conversions between data frame values and SQLite values
//! - `schema`: Database connection management and catalog lookups
//! - `queries`: Whole-table replace and read operations
//! - `tolerant`: Reads that always return the expected column shape

pub mod models;
pub mod queries;
pub mod schema;
pub mod tolerant;


pub use schema::StatsDatabase;
