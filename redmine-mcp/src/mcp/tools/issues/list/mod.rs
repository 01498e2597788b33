//! Issue listing tool for MCP operations

use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::redmine::types::ListIssuesParams;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for listing issues with optional project, status and assignee filters
#[derive(Default)]
pub struct ListIssuesTool;

impl ListIssuesTool {
    /// Creates a new instance of the ListIssuesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListIssuesTool {
    fn name(&self) -> &'static str {
        "get_issues"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for_type::<ListIssuesParams>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: ListIssuesParams = BaseToolImpl::parse_and_validate(self.name(), arguments)?;

        tracing::debug!(
            "Listing issues (project: {:?}, status: {:?})",
            request.project_id,
            request.status_id
        );

        let issues = McpErrorHandler::handle_result(
            context.client.list_issues(&request).await,
            self.name(),
        )?;
        BaseToolImpl::create_json_response(&issues)
    }
}
