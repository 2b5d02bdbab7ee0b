//! Markdown table rendering for query results

use crate::db::{Row, SqlValue};

/// Output for a statement that produced no result set
pub const NO_ROWS_MARKER: &str = "_No result rows._";

/// Appended by callers when a result hit its row cap
pub const TRUNCATION_NOTICE: &str = "_Remaining rows truncated..._";

/// Render rows as a pipe-delimited table in `columns` order
///
/// Null cells are empty. Pipes are escaped and line breaks become `<br>` in
/// both header and cells, so every record stays on one line. Truncation is the caller's business.
pub fn render_table(columns: &[String], rows: &[Row]) -> String {
    if columns.is_empty() {
        return NO_ROWS_MARKER.to_string();
    }

    let header = columns
        .iter()
        .map(|c| escape_cell(c))
        .collect::<Vec<_>>()
        .join(" | ");
    let separator = vec!["---"; columns.len()].join(" | ");
    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!("| {} |", header));
    lines.push(format!("| {} |", separator));

    for row in rows {
        let cells: Vec<String> = columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let value = row.get_at(i, column).or_else(|| row.get(column));
                escape_cell(&cell_text(value))
            })
            .collect();
        lines.push(format!("| {} |", cells.join(" | ")));
    }

    lines.join("\n")
}

/// Append `notice` after a blank line when `truncated` is set
pub fn with_notice(text: String, truncated: bool, notice: &str) -> String {
    if truncated {
        format!("{}\n\n{}", text, notice)
    } else {
        text
    }
}

fn cell_text(value: Option<&SqlValue>) -> String {
    match value {
        None | Some(SqlValue::Null) => String::new(),
        Some(v) => v.to_string(),
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace(['\n', '\r'], "<br>")
}
