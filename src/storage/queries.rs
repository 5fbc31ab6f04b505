//! Whole-table write and read operations

use super::models::{series_from_values, sql_type, to_sql_value};
use super::schema::{quote_ident, StatsDatabase};
use crate::table::row_values;
use anyhow::{ensure, Result};
use polars::prelude::*;
use rusqlite::params_from_iter;
use rusqlite::types::Value;
use std::collections::HashMap;

impl StatsDatabase {
    /// Replace `name` with the contents of `frame`.
    ///
    /// The drop, create and inserts run in one transaction, so the table is
    /// either fully replaced or left as it was. Column affinities follow the
    /// frame's column types.
    pub fn replace_table(&mut self, name: &str, frame: &DataFrame) -> Result<()> {
        ensure!(frame.width() > 0, "Table {} has no columns", name);

        let table = quote_ident(name);
        let column_defs: Vec<String> = frame
            .get_columns()
            .iter()
            .map(|s| format!("{} {}", quote_ident(s.name()), sql_type(s.dtype())))
            .collect();

        let tx = self.conn.transaction()?;
        tx.execute(&format!("DROP TABLE IF EXISTS {}", table), [])?;
        tx.execute(
            &format!("CREATE TABLE {} ({})", table, column_defs.join(", ")),
            [],
        )?;

        {
            let placeholders = vec!["?"; frame.width()].join(", ");
            let mut stmt =
                tx.prepare(&format!("INSERT INTO {} VALUES ({})", table, placeholders))?;
            for idx in 0..frame.height() {
                let row: Vec<Value> = row_values(frame, idx)?.iter().map(to_sql_value).collect();
                stmt.execute(params_from_iter(row))?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Read every row of `name`, keeping the stored column order
    pub fn read_table(&self, name: &str) -> Result<DataFrame> {
        let declared = self.declared_types(name)?;
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT * FROM {}", quote_ident(name)))?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = columns.len();

        let rows = stmt.query_map([], |row| {
            (0..width)
                .map(|i| row.get::<_, Value>(i))
                .collect::<rusqlite::Result<Vec<Value>>>()
        })?;

        let mut values: Vec<Vec<Value>> = vec![Vec::new(); width];
        for row in rows {
            for (column, value) in values.iter_mut().zip(row?) {
                column.push(value);
            }
        }

        let series: Vec<Series> = columns
            .iter()
            .zip(values)
            .map(|(col, vals)| {
                let decl = declared.get(col).map(String::as_str).unwrap_or("");
                series_from_values(col, vals, decl)
            })
            .collect();
        Ok(DataFrame::new(series)?)
    }

    /// Declared SQL type of each column of `name`
    fn declared_types(&self, name: &str) -> Result<HashMap<String, String>> {
        let mut stmt = self
            .conn
            .prepare(&format!("PRAGMA table_info({})", quote_ident(name)))?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(1)?, row.get::<_, String>(2)?))
        })?;

        let mut types = HashMap::new();
        for row in rows {
            let (column, ty) = row?;
            types.insert(column, ty);
        }
        Ok(types)
    }
}
