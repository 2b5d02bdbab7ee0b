//! Failure kinds of the tool surfaces
//!
//! Tools never hand these to the transport as errors: each one is rendered
//! into the text the tool returns.

use thiserror::Error;

use crate::db::ExecutionError;

pub const CONFIGURATION_MESSAGE: &str =
    "No database path configured. Pass `database_path` or set a default database path.";

#[derive(Error, Debug)]
pub enum ToolError {
    /// A required argument was missing or blank
    #[error("{0}")]
    InvalidArgument(String),

    /// No database path could be resolved
    #[error("{}", CONFIGURATION_MESSAGE)]
    Configuration,

    /// The database file was missing or SQLite rejected the statement
    #[error("{0}")]
    Execution(ExecutionError),

    /// The table or view being described does not exist
    #[error("Table or view `{0}` does not exist.")]
    NotFound(String),

    /// Anything else that went wrong inside the server
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

pub type ToolResult<T> = Result<T, ToolError>;

impl From<ExecutionError> for ToolError {
    fn from(err: ExecutionError) -> Self {
        match err {
            ExecutionError::Worker(detail) => ToolError::Unexpected(detail),
            other => ToolError::Execution(other),
        }
    }
}

impl ToolError {
    /// Log the failure at a level matching its kind and return its message
    pub fn into_text(self) -> String {
        match &self {
            ToolError::InvalidArgument(_) | ToolError::Configuration => {
                tracing::error!("{}", self)
            }
            ToolError::Execution(e) => tracing::error!(error = %e, "statement execution failed"),
            ToolError::NotFound(name) => tracing::warn!(table = %name, "table or view not found"),
            ToolError::Unexpected(detail) => tracing::error!(%detail, "unexpected tool failure"),
        }
        self.to_string()
    }
}

/// Collapse a tool outcome into the text returned to the caller
pub fn into_text(result: ToolResult<String>) -> String {
    result.unwrap_or_else(ToolError::into_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_messages() {
        assert_eq!(ToolError::Configuration.to_string(), CONFIGURATION_MESSAGE);
        assert_eq!(
            ToolError::NotFound("users".into()).to_string(),
            "Table or view `users` does not exist."
        );
        assert_eq!(
            ToolError::Unexpected("boom".into()).to_string(),
            "unexpected error: boom"
        );
        let missing = ToolError::from(ExecutionError::MissingDatabase(PathBuf::from("/tmp/x.db")));
        assert_eq!(missing.to_string(), "Database file does not exist: /tmp/x.db");
    }

    #[test]
    fn test_worker_failure_is_unexpected() {
        let err = ToolError::from(ExecutionError::Worker("task panicked".into()));
        assert!(matches!(err, ToolError::Unexpected(_)));
        assert_eq!(err.to_string(), "unexpected error: task panicked");

        let err = ToolError::from(ExecutionError::MultipleStatements);
        assert!(matches!(err, ToolError::Execution(_)));
    }

    #[test]
    fn test_into_text_passes_success_through() {
        assert_eq!(into_text(Ok("table".into())), "table");
        assert_eq!(into_text(Err(ToolError::Configuration)), CONFIGURATION_MESSAGE);
    }
}
