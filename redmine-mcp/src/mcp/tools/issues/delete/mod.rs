//! Issue deletion tool for MCP operations

use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::redmine::types::IssueIdParams;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for permanently deleting an issue
#[derive(Default)]
pub struct DeleteIssueTool;

impl DeleteIssueTool {
    /// Creates a new instance of the DeleteIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for DeleteIssueTool {
    fn name(&self) -> &'static str {
        "delete_issue"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for_type::<IssueIdParams>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: IssueIdParams = BaseToolImpl::parse_and_validate(self.name(), arguments)?;

        tracing::info!("Deleting issue {}", request.issue_id);

        let outcome = McpErrorHandler::handle_result(
            context.client.delete_issue(request.issue_id).await,
            self.name(),
        )?;
        BaseToolImpl::create_json_response(&outcome)
    }
}
