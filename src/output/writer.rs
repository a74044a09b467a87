//! Rendering of command results
//!
//! JSON mode prints the items exactly as the service returned them. Text mode
//! prints the command's summary projection as an aligned table.

use crate::error::{Error, Result};
use serde_json::Value;
use std::fmt::Write as _;
use std::str::FromStr;

/// Marker printed when a state-changing command succeeds
pub const DONE: &str = "DONE";

/// Output format selected with `--output`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// Raw JSON
    Json,
}

impl OutputFormat {
    /// Accepted values of `--output`
    pub const VALUES: [&'static str; 2] = ["json", "text"];

    /// Name used on the command line
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::validation(format!(
                "{other} is not a valid value for the output option. Allowed values are {}",
                Self::VALUES.join("|")
            ))),
        }
    }
}

/// What a command produced
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    /// A state change completed; there is nothing to show besides the marker
    Done,
    /// A list of items
    Items {
        /// Items as returned by the service
        raw: Vec<Value>,
        /// One summarized object per item, for text mode
        summary: Vec<Value>,
        /// Column order of the summary; derived from the data when empty
        columns: &'static [&'static str],
    },
}

/// Render a command result in the requested format
pub fn render(output: &CommandOutput, format: OutputFormat) -> Result<String> {
    match (output, format) {
        (CommandOutput::Done, OutputFormat::Text) => Ok(DONE.to_string()),
        (CommandOutput::Done, OutputFormat::Json) => Ok(String::new()),
        (CommandOutput::Items { raw, .. }, OutputFormat::Json) => {
            Ok(serde_json::to_string_pretty(raw)?)
        }
        (
            CommandOutput::Items {
                summary, columns, ..
            },
            OutputFormat::Text,
        ) => Ok(render_table(summary, columns)),
    }
}

/// Render objects as a table with a header and a dashed separator
pub fn render_table(rows: &[Value], columns: &[&str]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let columns: Vec<String> = if columns.is_empty() {
        derive_columns(rows)
    } else {
        columns.iter().map(ToString::to_string).collect()
    };

    let table: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|col| value_to_str(row.get(col).unwrap_or(&Value::Null)))
                .collect()
        })
        .collect();

    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in &table {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, &columns, &widths);
    let separator: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &separator, &widths);
    for row in &table {
        push_row(&mut out, row, &widths);
    }

    out.truncate(out.trim_end().len());
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            line.push_str("  ");
        }
        let _ = write!(line, "{:width$}", cell, width = widths[i]);
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Keys of all rows, in first-seen order
fn derive_columns(rows: &[Value]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        if let Value::Object(map) = row {
            for key in map.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
    }
    columns
}

fn value_to_str(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}
