//! Helpers for building and reading `CallToolResult` values

use rmcp::model::{CallToolResult, Content, RawContent};

/// Wrap plain text as a successful tool response
///
/// Tools that encode their own failures in the text (rather than as MCP
/// errors) return everything through this.
pub fn text_success(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Concatenate the text blocks of a tool response
///
/// Non-text content is skipped. Blocks are joined with a newline.
pub fn text_content(result: &CallToolResult) -> String {
    result
        .content
        .iter()
        .filter_map(|c| match &c.raw {
            RawContent::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}
