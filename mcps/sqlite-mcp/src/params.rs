//! Parameter types for SQLite MCP tools

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct RunQueryParams {
    #[schemars(description = "The SQL statement to execute (one statement per call)")]
    pub statement: String,

    #[schemars(
        description = "Maximum rows to return. Values above the server limit are clamped; zero or negative uses the server limit"
    )]
    pub max_rows: Option<i64>,

    #[schemars(description = "SQLite database file path. Uses the configured default when omitted")]
    pub database_path: Option<String>,

    #[schemars(description = "Optional identifier; when set, the result is saved and exposed as a resource")]
    pub save_as: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct ListTablesParams {
    #[schemars(description = "SQLite database file path. Uses the configured default when omitted")]
    pub database_path: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct DescribeTableParams {
    #[schemars(description = "Name of the table or view to describe")]
    pub table_name: String,

    #[schemars(description = "SQLite database file path. Uses the configured default when omitted")]
    pub database_path: Option<String>,
}
