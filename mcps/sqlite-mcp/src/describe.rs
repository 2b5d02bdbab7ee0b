//! Table/view introspection report
//!
//! `describe_table` looks the name up in `sqlite_master`, then runs one
//! PRAGMA per section (plus one `index_info` per index). Only the existence
//! check can fail the whole call; any later failure is written into its own
//! section and the remaining sections still run.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::db::{Executor, QueryResult, Row, SqlValue};
use crate::error::{ToolError, ToolResult};
use crate::render::{render_table, with_notice};

const INDEX_COLUMNS: [&str; 5] = ["name", "unique", "origin", "partial", "columns"];

/// Something that can run a metadata statement with a row cap
#[async_trait]
pub trait StatementRunner: Send + Sync {
    async fn run(&self, statement: String, max_rows: usize) -> ToolResult<QueryResult>;
}

/// The executor bound to one database file
#[derive(Debug, Clone)]
pub struct DatabaseTarget {
    pub executor: Executor,
    pub db_path: PathBuf,
}

#[async_trait]
impl StatementRunner for DatabaseTarget {
    async fn run(&self, statement: String, max_rows: usize) -> ToolResult<QueryResult> {
        Ok(self.executor.run(&self.db_path, statement, max_rows).await?)
    }
}

/// Double single quotes so `value` can sit inside a '...' SQL literal
///
/// Only safe inside string literals (catalog lookups, PRAGMA arguments),
/// never for bare identifiers.
pub fn escape_literal(value: &str) -> String {
    value.replace('\'', "''")
}

/// Build the four-section report for `table_name`
///
/// Returns [`ToolError::NotFound`] when no table or view has that name.
pub async fn describe_table<R: StatementRunner + ?Sized>(
    runner: &R,
    table_name: &str,
    max_rows: usize,
) -> ToolResult<String> {
    let escaped = escape_literal(table_name);

    let metadata = runner
        .run(
            format!(
                "SELECT name, type, COALESCE(sql, '') AS definition \
                 FROM sqlite_master \
                 WHERE name = '{}' AND type IN ('table', 'view') \
                 LIMIT 1",
                escaped
            ),
            1,
        )
        .await?;

    if metadata.rows.is_empty() {
        return Err(ToolError::NotFound(table_name.to_string()));
    }

    let mut sections = Vec::with_capacity(4);
    sections.push(format!(
        "**Basic Info**\n{}",
        render_table(&metadata.columns, &metadata.rows)
    ));

    let columns = runner
        .run(format!("PRAGMA table_info('{}')", escaped), max_rows)
        .await;
    sections.push(format!(
        "**Columns**\n{}",
        section_text(
            columns,
            "_No columns found._",
            "_Column list truncated..._",
            "columns"
        )
    ));

    sections.push(format!(
        "**Indexes**\n{}",
        index_section(runner, &escaped, max_rows).await
    ));

    let foreign_keys = runner
        .run(format!("PRAGMA foreign_key_list('{}')", escaped), max_rows)
        .await;
    sections.push(format!(
        "**Foreign Keys**\n{}",
        section_text(
            foreign_keys,
            "_No foreign keys found._",
            "_Foreign key list truncated..._",
            "foreign keys"
        )
    ));

    Ok(sections.join("\n\n"))
}

fn section_text(
    result: ToolResult<QueryResult>,
    empty_note: &str,
    truncated_note: &str,
    what: &str,
) -> String {
    match result {
        Ok(r) if r.rows.is_empty() => empty_note.to_string(),
        Ok(r) => with_notice(render_table(&r.columns, &r.rows), r.truncated, truncated_note),
        Err(e) => section_error(e, what),
    }
}

fn section_error(err: ToolError, what: &str) -> String {
    match err {
        ToolError::Unexpected(detail) => {
            tracing::error!(%detail, section = what, "unexpected failure while describing table");
            format!("unexpected error while fetching {}: {}", what, detail)
        }
        other => {
            tracing::error!(error = %other, section = what, "failed to fetch table metadata");
            format!("Failed to fetch {}: {}", what, other)
        }
    }
}

async fn index_section<R: StatementRunner + ?Sized>(
    runner: &R,
    escaped_table: &str,
    max_rows: usize,
) -> String {
    let list = match runner
        .run(format!("PRAGMA index_list('{}')", escaped_table), max_rows)
        .await
    {
        Ok(list) => list,
        Err(e) => return section_error(e, "indexes"),
    };

    let mut rows = Vec::with_capacity(list.rows.len());
    for index in &list.rows {
        let name = match index.get("name") {
            Some(SqlValue::Null) | None => continue,
            Some(v) => v.to_string(),
        };
        if name.is_empty() {
            continue;
        }

        let columns = index_columns(runner, &name, max_rows).await;
        let origin = index
            .get("origin")
            .filter(|v| !v.is_null())
            .map(|v| v.to_string())
            .unwrap_or_default();
        rows.push(Row::from_pairs([
            ("name", SqlValue::from(name)),
            ("unique", SqlValue::from(yes_no(index.get("unique")))),
            ("origin", SqlValue::from(origin)),
            ("partial", SqlValue::from(yes_no(index.get("partial")))),
            ("columns", SqlValue::from(columns)),
        ]));
    }

    if rows.is_empty() {
        return "_No indexes found._".to_string();
    }

    let columns: Vec<String> = INDEX_COLUMNS.iter().map(|c| c.to_string()).collect();
    with_notice(
        render_table(&columns, &rows),
        list.truncated,
        "_Index list truncated..._",
    )
}

/// Comma-separated column names of one index, or an inline error
async fn index_columns<R: StatementRunner + ?Sized>(
    runner: &R,
    index_name: &str,
    max_rows: usize,
) -> String {
    let info = runner
        .run(
            format!("PRAGMA index_info('{}')", escape_literal(index_name)),
            max_rows,
        )
        .await;

    match info {
        Ok(info) => {
            let mut names: Vec<String> = info
                .rows
                .iter()
                .filter_map(|row| row.get("name"))
                .filter(|v| !v.is_null())
                .map(|v| v.to_string())
                .filter(|n| !n.is_empty())
                .collect();
            if info.truncated {
                names.push("...".to_string());
            }
            names.join(", ")
        }
        Err(ToolError::Unexpected(detail)) => {
            tracing::error!(index = index_name, %detail, "unexpected failure reading index columns");
            format!("unexpected error: {}", detail)
        }
        Err(e) => {
            tracing::error!(index = index_name, error = %e, "failed to read index columns");
            format!("error: {}", e)
        }
    }
}

fn yes_no(value: Option<&SqlValue>) -> &'static str {
    if value.is_some_and(SqlValue::is_truthy) {
        "yes"
    } else {
        "no"
    }
}
