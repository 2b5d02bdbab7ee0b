//! Statement execution failures

use std::path::PathBuf;
use thiserror::Error;

/// Why a statement could not produce a [`QueryResult`](super::QueryResult)
///
/// Terminal for the call: nothing is retried.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The database file was not there when the call started
    #[error("Database file does not exist: {}", .0.display())]
    MissingDatabase(PathBuf),

    /// The input held only whitespace, separators or comments
    #[error("No SQL statement to execute.")]
    EmptyStatement,

    /// The input held more than one statement; none of them ran
    #[error("You can only execute one statement at a time.")]
    MultipleStatements,

    /// SQLite rejected the statement (syntax, constraint, lock, read-only...)
    #[error("{0}")]
    Engine(#[from] rusqlite::Error),

    /// The blocking worker panicked or was cancelled
    #[error("worker failed: {0}")]
    Worker(String),
}

pub type ExecutionResult<T> = Result<T, ExecutionError>;
