//! Single-statement execution against a SQLite file
//!
//! Every call opens its own connection inside a blocking worker, runs one
//! statement, and drops the connection before returning. Nothing is shared
//! between calls except the file itself; locking is left to SQLite.

use rusqlite::{Batch, Connection, OpenFlags, Statement};
use std::path::{Path, PathBuf};

use super::error::{ExecutionError, ExecutionResult};
use super::result::QueryResult;
use super::value::{Row, SqlValue};

/// Statements SQLite refuses to run inside an explicit transaction, or that
/// manage transactions themselves
const NO_TRANSACTION_KEYWORDS: &[&str] = &[
    "VACUUM", "ATTACH", "DETACH", "PRAGMA", "BEGIN", "COMMIT", "END", "ROLLBACK", "SAVEPOINT",
    "RELEASE",
];

const PREVIEW_LIMIT: usize = 160;

/// Runs statements in the process-wide access mode
#[derive(Debug, Clone, Copy)]
pub struct Executor {
    read_only: bool,
}

impl Executor {
    pub fn new(read_only: bool) -> Self {
        Self { read_only }
    }

    /// Run `statement` on a blocking worker and wait for it
    ///
    /// A panicking or cancelled worker surfaces as [`ExecutionError::Worker`].
    pub async fn run(
        &self,
        db_path: &Path,
        statement: impl Into<String>,
        max_rows: usize,
    ) -> ExecutionResult<QueryResult> {
        let db_path: PathBuf = db_path.to_path_buf();
        let statement = statement.into();
        let read_only = self.read_only;

        tokio::task::spawn_blocking(move || {
            execute_blocking(&db_path, &statement, max_rows, read_only)
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "sqlite worker failed");
            ExecutionError::Worker(e.to_string())
        })?
    }
}

/// Execute one statement and close the connection
///
/// Tabular statements return at most `max_rows` rows; one extra row is
/// fetched to decide `truncated`. Other statements return the affected-row
/// count. In write mode a mutating statement runs in its own transaction,
/// committed on success and rolled back on error. Input holding more than
/// one statement is rejected before anything runs.
pub fn execute_blocking(
    db_path: &Path,
    statement: &str,
    max_rows: usize,
    read_only: bool,
) -> ExecutionResult<QueryResult> {
    if !db_path.exists() {
        return Err(ExecutionError::MissingDatabase(db_path.to_path_buf()));
    }

    tracing::debug!(
        db = %db_path.display(),
        read_only,
        max_rows,
        sql = %preview(statement),
        "executing statement"
    );

    let conn = open(db_path, read_only)?;
    let result = run_statement(&conn, statement, max_rows, read_only);

    match &result {
        Ok(r) => tracing::debug!(
            row_count = r.row_count,
            truncated = r.truncated,
            column_count = r.columns.len(),
            "statement finished"
        ),
        Err(e) => tracing::debug!(error = %e, "statement failed"),
    }

    // conn drops here on every path, closing the file handle
    result
}

fn open(db_path: &Path, read_only: bool) -> rusqlite::Result<Connection> {
    // No SQLITE_OPEN_CREATE: a file removed after the existence check stays an error
    let mode = if read_only {
        OpenFlags::SQLITE_OPEN_READ_ONLY
    } else {
        OpenFlags::SQLITE_OPEN_READ_WRITE
    };
    Connection::open_with_flags(db_path, mode | OpenFlags::SQLITE_OPEN_NO_MUTEX)
}

/// Prepare the only statement in `sql`
///
/// Empty statements (stray `;`, whitespace, comments) are skipped by the
/// batch, so only real statements count.
fn prepare_single<'conn>(conn: &'conn Connection, sql: &str) -> ExecutionResult<Statement<'conn>> {
    let mut batch = Batch::new(conn, sql);
    let stmt = batch.next()?.ok_or(ExecutionError::EmptyStatement)?;
    match batch.next() {
        Ok(None) => Ok(stmt),
        // A tail that fails to prepare is still a second statement
        Ok(Some(_)) | Err(_) => Err(ExecutionError::MultipleStatements),
    }
}

fn run_statement(
    conn: &Connection,
    statement: &str,
    max_rows: usize,
    read_only: bool,
) -> ExecutionResult<QueryResult> {
    let mut stmt = prepare_single(conn, statement)?;

    let tx = if !read_only && !stmt.readonly() && wants_transaction(statement) {
        Some(conn.unchecked_transaction()?)
    } else {
        None
    };

    let outcome = fetch(&mut stmt, max_rows);
    // Finalize before COMMIT/ROLLBACK
    drop(stmt);

    match (outcome, tx) {
        (Ok(result), Some(tx)) => {
            tx.commit()?;
            Ok(result)
        }
        (Ok(result), None) => Ok(result),
        (Err(e), Some(tx)) => {
            if let Err(rollback_err) = tx.rollback() {
                tracing::warn!(error = %rollback_err, "rollback failed");
            }
            Err(e)
        }
        (Err(e), None) => Err(e),
    }
}

fn fetch(stmt: &mut Statement<'_>, max_rows: usize) -> ExecutionResult<QueryResult> {
    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(String::from)
        .collect();

    if columns.is_empty() {
        let affected = stmt.execute([])?;
        return Ok(QueryResult::mutation(affected));
    }

    let mut rows = Vec::new();
    let mut truncated = false;
    let mut cursor = stmt.query([])?;

    while let Some(row) = cursor.next()? {
        if rows.len() == max_rows {
            truncated = true;
            break;
        }
        let mut values = Vec::with_capacity(columns.len());
        for (i, name) in columns.iter().enumerate() {
            values.push((name.clone(), SqlValue::from(row.get_ref(i)?)));
        }
        rows.push(Row::new(values));
    }

    Ok(QueryResult::tabular(columns, rows, truncated))
}

fn wants_transaction(statement: &str) -> bool {
    let keyword: String = skip_leading_comments(statement)
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    !NO_TRANSACTION_KEYWORDS
        .iter()
        .any(|k| k.eq_ignore_ascii_case(&keyword))
}

/// `sql` without leading whitespace, `--` line comments and `/* */` blocks
fn skip_leading_comments(sql: &str) -> &str {
    let mut rest = sql.trim_start();
    loop {
        if let Some(line) = rest.strip_prefix("--") {
            rest = match line.find('\n') {
                Some(end) => &line[end + 1..],
                None => "",
            };
        } else if let Some(block) = rest.strip_prefix("/*") {
            rest = match block.find("*/") {
                Some(end) => &block[end + 2..],
                None => "",
            };
        } else {
            return rest;
        }
        rest = rest.trim_start();
    }
}

fn preview(sql: &str) -> String {
    let sql = sql.trim();
    match sql.char_indices().nth(PREVIEW_LIMIT) {
        Some((idx, _)) => format!("{}...", &sql[..idx]),
        None => sql.to_string(),
    }
}
