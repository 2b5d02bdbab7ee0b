//! Prompt catalogue

use rmcp::model::{GetPromptResult, Prompt, PromptMessage, PromptMessageRole};

pub const SQL_BEST_PRACTICES: &str = "sql-best-practices";

const SQL_BEST_PRACTICES_TEXT: &str = "\
Before querying, call list_tables and describe_table to learn the schema.
Select only the columns you need and add a WHERE clause or LIMIT instead of \
relying on the row cap. Filter on indexed columns where possible; \
EXPLAIN QUERY PLAN shows whether an index is used. Prefer explicit JOIN ... ON \
over comma joins, and check row counts with COUNT(*) before pulling large result sets.";

pub fn list_prompts() -> Vec<Prompt> {
    vec![Prompt::new(
        SQL_BEST_PRACTICES,
        Some("Advice for writing and tuning SQL queries"),
        None,
    )]
}

/// Prompt content by name, or `None` for an unknown prompt
pub fn get_prompt(name: &str) -> Option<GetPromptResult> {
    match name {
        SQL_BEST_PRACTICES => Some(GetPromptResult {
            description: Some("Advice for writing and tuning SQL queries".to_string()),
            messages: vec![PromptMessage::new_text(
                PromptMessageRole::User,
                SQL_BEST_PRACTICES_TEXT,
            )],
        }),
        _ => None,
    }
}
