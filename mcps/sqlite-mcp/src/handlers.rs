//! Tool handlers
//!
//! Each handler resolves the database, runs through the executor and always
//! returns text: failures are rendered into the output rather than raised.

use std::path::PathBuf;

use crate::config::Settings;
use crate::db::Executor;
use crate::describe::{self, DatabaseTarget};
use crate::error::{into_text, ToolError, ToolResult};
use crate::params::*;
use crate::render::{render_table, with_notice, TRUNCATION_NOTICE};
use crate::resolver::resolve_database_path;
use crate::results::ResultStore;

const LIST_TABLES_SQL: &str = "SELECT name, type, COALESCE(tbl_name, name) AS table_name \
     FROM sqlite_master \
     WHERE type IN ('table', 'view') AND name NOT LIKE 'sqlite\\_%' ESCAPE '\\' \
     ORDER BY name";

// ============================================================================
// Helper Functions
// ============================================================================

fn database_for(settings: &Settings, per_call: Option<&str>) -> ToolResult<PathBuf> {
    resolve_database_path(per_call, settings.default_db_path.as_deref())
        .ok_or(ToolError::Configuration)
}

fn executor_for(settings: &Settings) -> Executor {
    Executor::new(settings.read_only)
}

// ============================================================================
// run_query
// ============================================================================

pub async fn run_query(settings: &Settings, results: &ResultStore, params: RunQueryParams) -> String {
    tracing::debug!(?params, "run_query called");
    into_text(try_run_query(settings, results, params).await)
}

async fn try_run_query(
    settings: &Settings,
    results: &ResultStore,
    params: RunQueryParams,
) -> ToolResult<String> {
    let statement = params.statement.trim();
    if statement.is_empty() {
        return Err(ToolError::InvalidArgument(
            "Please provide a non-empty `statement`.".to_string(),
        ));
    }

    let db_path = database_for(settings, params.database_path.as_deref())?;
    let max_rows = settings.effective_max_rows(params.max_rows);

    let result = executor_for(settings)
        .run(&db_path, statement, max_rows)
        .await?;

    let mut output = with_notice(
        render_table(&result.columns, &result.rows),
        result.truncated,
        TRUNCATION_NOTICE,
    );
    if !result.is_tabular() {
        output.push_str(&format!("\n\nRows affected: {}", result.row_count));
    }

    if let Some(id) = params.save_as.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
        match results.store(id, &result.to_payload()) {
            Ok(_) => output.push_str(&format!("\n\nSaved result as `{}`.", id)),
            Err(e) => {
                tracing::error!(id, error = %format!("{:#}", e), "failed to save query result");
                output.push_str(&format!("\n\nFailed to save result `{}`: {:#}", id, e));
            }
        }
    }

    Ok(output)
}

// ============================================================================
// list_tables
// ============================================================================

pub async fn list_tables(settings: &Settings, params: ListTablesParams) -> String {
    tracing::debug!(?params, "list_tables called");
    into_text(try_list_tables(settings, params).await)
}

async fn try_list_tables(settings: &Settings, params: ListTablesParams) -> ToolResult<String> {
    let db_path = database_for(settings, params.database_path.as_deref())?;

    let result = executor_for(settings)
        .run(&db_path, LIST_TABLES_SQL, settings.max_rows)
        .await?;

    Ok(with_notice(
        render_table(&result.columns, &result.rows),
        result.truncated,
        TRUNCATION_NOTICE,
    ))
}

// ============================================================================
// describe_table
// ============================================================================

pub async fn describe_table(settings: &Settings, params: DescribeTableParams) -> String {
    tracing::debug!(?params, "describe_table called");
    into_text(try_describe_table(settings, params).await)
}

async fn try_describe_table(settings: &Settings, params: DescribeTableParams) -> ToolResult<String> {
    let table_name = params.table_name.trim();
    if table_name.is_empty() {
        return Err(ToolError::InvalidArgument(
            "Please provide a valid `table_name`.".to_string(),
        ));
    }

    let target = DatabaseTarget {
        executor: executor_for(settings),
        db_path: database_for(settings, params.database_path.as_deref())?,
    };

    describe::describe_table(&target, table_name, settings.max_rows).await
}
