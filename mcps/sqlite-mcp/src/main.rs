//! SQLite MCP Server
//!
//! SQL tools over SQLite database files, served on stdio.
//!
//! # Configuration
//! Flags or `SQLITE_MCP_*` env vars, layered over `~/.binks/sqlite.toml`

use clap::Parser;
use rmcp::{transport::stdio, ServiceExt};

use sqlite_mcp::config::{Args, Settings};
use sqlite_mcp::SqliteMcpServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    mcp_common::init_tracing("sqlite_mcp")?;

    let args = Args::parse();

    tracing::info!("Starting SQLite MCP Server");

    let settings = Settings::load(&args)?;
    tracing::info!(
        default_db = ?settings.default_db_path,
        read_only = settings.read_only,
        max_rows = settings.max_rows,
        storage = %settings.storage_path.display(),
        "Settings loaded"
    );

    let server = SqliteMcpServer::new(settings)?;
    let service = server.serve(stdio()).await?;

    tracing::info!("Server running, waiting for requests...");
    service.waiting().await?;

    tracing::info!("Server shutting down");
    Ok(())
}
