//! Reads that never fail.
//!
//! Callers declare the columns they expect and always get a frame shaped
//! around them: a missing or unreadable table, or one sharing none of the
//! expected columns, comes back as an empty frame with exactly the expected
//! columns. Otherwise only the expected columns that exist are kept, in
//! expected order.

use super::schema::StatsDatabase;
use crate::table::{empty_frame, project};
use polars::prelude::DataFrame;
use tracing::{debug, warn};

impl StatsDatabase {
    pub fn read_tolerant<S: AsRef<str>>(&self, table: &str, expected: &[S]) -> DataFrame {
        let frame = match self.read_table(table) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(table, error = %e, "table unavailable, using empty frame");
                return empty_frame(expected);
            }
        };

        let projected = project(&frame, expected);
        if projected.width() == 0 {
            warn!(
                table,
                found = ?frame.get_column_names(),
                "no expected columns present, using empty frame"
            );
            return empty_frame(expected);
        }

        if projected.width() < expected.len() {
            debug!(
                table,
                kept = ?projected.get_column_names(),
                "table is missing some expected columns"
            );
        }
        projected
    }
}
