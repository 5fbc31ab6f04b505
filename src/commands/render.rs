//! Plain-text rendering of dashboard sections.

use super::dashboard::{Section, Selections};
use crate::table::{row_values, value_to_string};
use polars::prelude::{AnyValue, DataFrame};

/// Placeholder printed for missing values
const MISSING: &str = "NA";

pub fn print_selections(selections: &Selections) {
    println!();
    println!("Filters");
    println!("  Years: {}", describe_choice(&selections.years));
    println!("  Teams: {}", describe_choice(&selections.teams));
    println!(
        "  Career home runs (min): {}",
        selections
            .min_home_runs
            .map_or_else(|| "-".to_string(), |v| v.to_string())
    );
    println!("  League: {}", describe_option(selections.league.as_ref()));
    println!("  Player: {}", describe_option(selections.player.as_ref()));
}

fn describe_choice(values: &[String]) -> String {
    if values.is_empty() {
        "all".to_string()
    } else {
        values.join(", ")
    }
}

fn describe_option(value: Option<&String>) -> String {
    value.map_or_else(|| "-".to_string(), String::clone)
}

pub fn print_section(title: &str, section: &Section) {
    println!();
    println!("== {} ==", title);
    match section {
        Section::Table { frame, index } => print!("{}", format_table(frame, index.as_deref())),
        Section::Info { message } => println!("{}", message),
        Section::Error { message } => println!("Error: {}", message),
    }
}

/// Lay a frame out as aligned text columns.
///
/// When `index` names a column, that column is printed first and set off
/// from the others. Widths count characters, not bytes, so accented names
/// line up.
pub fn format_table(frame: &DataFrame, index: Option<&str>) -> String {
    let columns = frame.get_column_names();
    let mut order: Vec<usize> = (0..columns.len()).collect();
    let index_pos = index.and_then(|name| columns.iter().position(|c| *c == name));
    if let Some(pos) = index_pos {
        order.retain(|&i| i != pos);
        order.insert(0, pos);
    }

    let cells: Vec<Vec<String>> = (0..frame.height())
        .map(|idx| match row_values(frame, idx) {
            Ok(row) => order.iter().map(|&i| display_value(&row[i])).collect(),
            Err(_) => vec![MISSING.to_string(); order.len()],
        })
        .collect();

    let widths: Vec<usize> = order
        .iter()
        .enumerate()
        .map(|(k, &i)| {
            cells
                .iter()
                .map(|r| r[k].chars().count())
                .chain(std::iter::once(columns[i].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let separator = |k: usize| {
        if k == 0 {
            ""
        } else if k == 1 && index_pos.is_some() {
            " | "
        } else {
            "  "
        }
    };

    let mut out = String::new();
    let mut push_line = |values: Vec<&str>| {
        let mut line = String::new();
        for (k, value) in values.into_iter().enumerate() {
            line.push_str(separator(k));
            line.push_str(value);
            let pad = widths[k].saturating_sub(value.chars().count());
            line.push_str(&" ".repeat(pad));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    };

    push_line(order.iter().map(|&i| columns[i]).collect());
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    push_line(rule.iter().map(String::as_str).collect());
    for row in &cells {
        push_line(row.iter().map(String::as_str).collect());
    }
    out
}

fn display_value(value: &AnyValue) -> String {
    match value {
        AnyValue::Null => MISSING.to_string(),
        AnyValue::Float64(f) if f.fract() != 0.0 => format!("{:.3}", f),
        other => value_to_string(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::empty_frame;
    use polars::prelude::*;

    #[test]
    fn test_format_table_aligns_columns() {
        let f = df!(
            "Name" => &["Hank Aaron", "Ruth"],
            "Career_Home_Runs" => &[Some(755i64), None]
        )
        .unwrap();
        let text = format_table(&f, None);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Name        Career_Home_Runs");
        assert_eq!(lines[1], "----------  ----------------");
        assert_eq!(lines[2], "Hank Aaron  755");
        assert_eq!(lines[3], "Ruth        NA");
    }

    #[test]
    fn test_format_table_aligns_accented_names() {
        let f = df!(
            "Name" => &["José Bautista", "Ichiro Suzuki"],
            "Team" => &["TOR", "SEA"]
        )
        .unwrap();
        let text = format_table(&f, None);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Name           Team");
        assert_eq!(lines[1], "-------------  ----");
        assert_eq!(lines[2], "José Bautista  TOR");
        assert_eq!(lines[3], "Ichiro Suzuki  SEA");
    }

    #[test]
    fn test_format_table_index_first() {
        let f = df!(
            "Batting_Average" => &[0.3456],
            "Year" => &[2001i64]
        )
        .unwrap();
        let text = format_table(&f, Some("Year"));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Year | Batting_Average");
        assert_eq!(lines[2], "2001 | 0.346");
    }

    #[test]
    fn test_format_empty_frame_prints_header() {
        let f = empty_frame(&["Name"]);
        assert_eq!(format_table(&f, None), "Name\n----\n");
    }

    #[test]
    fn test_describe_choice() {
        assert_eq!(describe_choice(&[]), "all");
        assert_eq!(
            describe_choice(&["2001".to_string(), "2002".to_string()]),
            "2001, 2002"
        );
    }
}
