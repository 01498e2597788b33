//! Issue subject search tool for MCP operations

use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::redmine::types::SearchIssuesParams;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for finding issues whose subject contains a piece of text
#[derive(Default)]
pub struct SearchIssuesTool;

impl SearchIssuesTool {
    /// Creates a new instance of the SearchIssuesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for SearchIssuesTool {
    fn name(&self) -> &'static str {
        "search_issues"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for_type::<SearchIssuesParams>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: SearchIssuesParams =
            BaseToolImpl::parse_and_validate(self.name(), arguments)?;

        tracing::debug!("Searching issue subjects for '{}'", request.query);

        let issues = McpErrorHandler::handle_result(
            context.client.search_issues(&request).await,
            self.name(),
        )?;
        BaseToolImpl::create_json_response(&issues)
    }
}
