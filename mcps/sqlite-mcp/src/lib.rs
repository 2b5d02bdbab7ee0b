//! SQLite MCP Library
//!
//! Runs SQL against SQLite database files and renders results as markdown
//! tables. Databases open read-write unless read-only mode is configured.
//!
//! # Usage as Library
//!
//! ```rust,ignore
//! use mcp_common::{text_content, EmbeddableMcp};
//! use sqlite_mcp::{config::Settings, SqliteMcpServer};
//!
//! let settings = Settings::new(Some("app.db".into()), "results".into());
//! let server = SqliteMcpServer::new(settings)?;
//! let result = server
//!     .call_tool("list_tables", serde_json::json!({}))
//!     .await?;
//! println!("{}", text_content(&result));
//! ```

pub mod config;
pub mod db;
pub mod describe;
pub mod error;
pub mod handlers;
pub mod params;
pub mod prompts;
pub mod render;
pub mod resolver;
pub mod results;
pub mod server;

// Re-export main server type
pub use server::SqliteMcpServer;

// Re-export parameter types for direct API usage
pub use params::{DescribeTableParams, ListTablesParams, RunQueryParams};
