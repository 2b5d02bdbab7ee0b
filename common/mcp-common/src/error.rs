//! Conversions from library errors into MCP errors

use rmcp::ErrorData as McpError;

/// Type alias for MCP handler results
pub type McpResult<T> = Result<T, McpError>;

/// Convert an error into an MCP internal error
pub trait IntoMcpError {
    fn into_mcp_error(self) -> McpError;
}

impl IntoMcpError for std::io::Error {
    fn into_mcp_error(self) -> McpError {
        McpError::internal_error(format!("IO error: {}", self), None)
    }
}

impl IntoMcpError for serde_json::Error {
    fn into_mcp_error(self) -> McpError {
        McpError::internal_error(format!("JSON error: {}", self), None)
    }
}

impl IntoMcpError for anyhow::Error {
    fn into_mcp_error(self) -> McpError {
        // {:#} keeps the context chain on one line
        McpError::internal_error(format!("{:#}", self), None)
    }
}

/// `.to_mcp_err()` for any `Result` whose error implements [`IntoMcpError`]
///
/// ```rust,ignore
/// let text = store.read(id).to_mcp_err()?;
/// ```
pub trait ResultExt<T> {
    fn to_mcp_err(self) -> McpResult<T>;
}

impl<T, E: IntoMcpError> ResultExt<T> for Result<T, E> {
    fn to_mcp_err(self) -> McpResult<T> {
        self.map_err(|e| e.into_mcp_error())
    }
}

/// Create an invalid params error with a message
pub fn invalid_params(message: impl Into<String>) -> McpError {
    McpError::invalid_params(message.into(), None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_io_error_converts() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing.json",
        ));
        let err = result.to_mcp_err().unwrap_err();
        assert!(err.message.contains("missing.json"));
    }

    #[test]
    fn test_anyhow_keeps_context() {
        let result: anyhow::Result<()> = Err(anyhow::anyhow!("disk full")).context("saving result");
        let err = result.to_mcp_err().unwrap_err();
        assert!(err.message.contains("saving result"));
        assert!(err.message.contains("disk full"));
    }

    #[test]
    fn test_invalid_params() {
        let err = invalid_params("unknown prompt");
        assert!(err.message.contains("unknown prompt"));
    }
}
