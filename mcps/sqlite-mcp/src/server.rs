//! MCP Server implementation for SQLite databases

use mcp_common::{
    async_trait, invalid_params, text_success, EmbeddableError, EmbeddableMcp, EmbeddableResult,
    McpError, ResultExt,
};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        AnnotateAble, CallToolResult, GetPromptRequestParam, GetPromptResult, ListPromptsResult,
        ListResourcesResult, PaginatedRequestParam, RawResource, ReadResourceRequestParam,
        ReadResourceResult, ResourceContents, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    tool, tool_handler, tool_router, RoleServer,
};
use serde_json::Value;
use std::sync::Arc;

use crate::config::Settings;
use crate::handlers;
use crate::params::{DescribeTableParams, ListTablesParams, RunQueryParams};
use crate::prompts;
use crate::results::ResultStore;

/// The SQLite MCP Server
#[derive(Clone)]
pub struct SqliteMcpServer {
    settings: Arc<Settings>,
    results: ResultStore,
    tool_router: ToolRouter<Self>,
}

impl SqliteMcpServer {
    /// Create a server from resolved settings, preparing the result storage directory
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let results = ResultStore::new(settings.storage_path.clone())?;
        Ok(Self {
            settings: Arc::new(settings),
            results,
            tool_router: Self::tool_router(),
        })
    }

    pub fn results(&self) -> &ResultStore {
        &self.results
    }

    fn mode(&self) -> &'static str {
        if self.settings.read_only {
            "read-only"
        } else {
            "read-write"
        }
    }
}

#[tool_router]
impl SqliteMcpServer {
    #[tool(
        description = "Execute one SQL statement against a SQLite database file and return the \
                       result as a markdown table. Results are capped at max_rows; a notice is \
                       appended when rows were cut off. Set save_as to keep the full result as a resource."
    )]
    async fn run_query(
        &self,
        Parameters(params): Parameters<RunQueryParams>,
    ) -> Result<CallToolResult, McpError> {
        let text = handlers::run_query(&self.settings, &self.results, params).await;
        Ok(text_success(text))
    }

    #[tool(description = "List the user tables and views in a SQLite database file")]
    async fn list_tables(
        &self,
        Parameters(params): Parameters<ListTablesParams>,
    ) -> Result<CallToolResult, McpError> {
        let text = handlers::list_tables(&self.settings, params).await;
        Ok(text_success(text))
    }

    #[tool(
        description = "Describe a table or view: its definition, columns, indexes and foreign keys"
    )]
    async fn describe_table(
        &self,
        Parameters(params): Parameters<DescribeTableParams>,
    ) -> Result<CallToolResult, McpError> {
        let text = handlers::describe_table(&self.settings, params).await;
        Ok(text_success(text))
    }
}

#[tool_handler]
impl rmcp::ServerHandler for SqliteMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(format!(
                "SQLite MCP server. Currently in {} mode. Use list_tables to discover tables, \
                 describe_table to inspect one, and run_query to execute SQL. Saved results are \
                 available as resources; the sql-best-practices prompt has query-writing advice.",
                self.mode()
            )),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let ids = self.results.list().to_mcp_err()?;
        let resources = ids
            .iter()
            .map(|id| {
                let mut resource =
                    RawResource::new(self.results.uri_for(id), format!("SQL Result {}", id));
                resource.description = Some(format!("Saved result of query `{}`", id));
                resource.mime_type = Some("application/json".to_string());
                resource.no_annotation()
            })
            .collect();
        Ok(ListResourcesResult::with_all_items(resources))
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParam { uri }: ReadResourceRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let id = self
            .results
            .id_from_uri(&uri)
            .filter(|id| self.results.path_for(id).is_file());
        let Some(id) = id else {
            return Err(McpError::resource_not_found(
                "resource_not_found",
                Some(serde_json::json!({ "uri": uri })),
            ));
        };

        let text = self.results.read(&id).to_mcp_err()?;
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(text, uri)],
        })
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult::with_all_items(prompts::list_prompts()))
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        prompts::get_prompt(&request.name)
            .ok_or_else(|| invalid_params(format!("Unknown prompt: {}", request.name)))
    }
}

// ============================================================================
// EmbeddableMcp Implementation
// ============================================================================

#[async_trait]
impl EmbeddableMcp for SqliteMcpServer {
    fn server_name(&self) -> &str {
        "sqlite"
    }

    fn server_description(&self) -> Option<&str> {
        Some(
            "SQLite MCP Server - run SQL statements against SQLite database files, \
             list tables and describe table structure.",
        )
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    async fn call_tool(&self, name: &str, params: Value) -> EmbeddableResult<CallToolResult> {
        match name {
            "run_query" => {
                let params: RunQueryParams = serde_json::from_value(params)?;
                self.run_query(Parameters(params)).await.map_err(Into::into)
            }

            "list_tables" => {
                let params: ListTablesParams = serde_json::from_value(params)?;
                self.list_tables(Parameters(params)).await.map_err(Into::into)
            }

            "describe_table" => {
                let params: DescribeTableParams = serde_json::from_value(params)?;
                self.describe_table(Parameters(params)).await.map_err(Into::into)
            }

            _ => Err(EmbeddableError::ToolNotFound(name.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn server(dir: &TempDir) -> SqliteMcpServer {
        let settings = Settings::new(None, dir.path().join("results"));
        SqliteMcpServer::new(settings).unwrap()
    }

    #[test]
    fn test_embeddable_server_name() {
        let dir = TempDir::new().unwrap();
        assert_eq!(server(&dir).server_name(), "sqlite");
    }

    #[test]
    fn test_embeddable_list_tools() {
        let dir = TempDir::new().unwrap();
        let tools = server(&dir).list_tools();
        let mut names: Vec<String> = tools.iter().map(|t| t.name.to_string()).collect();
        names.sort();
        assert_eq!(names, vec!["describe_table", "list_tables", "run_query"]);
    }

    #[test]
    fn test_new_creates_storage() {
        let dir = TempDir::new().unwrap();
        let server = server(&dir);
        assert!(server.results().root().is_dir());
    }

    #[test]
    fn test_info_reports_mode() {
        let dir = TempDir::new().unwrap();
        let writable = server(&dir);
        let info = rmcp::ServerHandler::get_info(&writable);
        assert!(info.instructions.unwrap().contains("read-write mode"));
        assert!(info.capabilities.resources.is_some());
        assert!(info.capabilities.prompts.is_some());

        let settings = Settings::new(None, dir.path().join("results")).with_read_only(true);
        let read_only = SqliteMcpServer::new(settings).unwrap();
        let info = rmcp::ServerHandler::get_info(&read_only);
        assert!(info.instructions.unwrap().contains("read-only mode"));
    }

    #[tokio::test]
    async fn test_embeddable_unknown_tool() {
        let dir = TempDir::new().unwrap();
        let result = server(&dir).call_tool("drop_everything", Value::Null).await;
        assert!(matches!(result, Err(EmbeddableError::ToolNotFound(_))));
    }

    #[tokio::test]
    async fn test_embeddable_invalid_params() {
        let dir = TempDir::new().unwrap();
        let result = server(&dir)
            .call_tool("run_query", serde_json::json!({ "max_rows": 3 }))
            .await;
        assert!(matches!(result, Err(EmbeddableError::InvalidParams(_))));
    }
}
