//! Single issue retrieval tool for MCP operations

use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::redmine::types::IssueIdParams;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for retrieving one issue including its history
#[derive(Default)]
pub struct GetIssueTool;

impl GetIssueTool {
    /// Creates a new instance of the GetIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetIssueTool {
    fn name(&self) -> &'static str {
        "get_issue"
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

        let issue = McpErrorHandler::handle_result(
            context.client.get_issue(request.issue_id).await,
            self.name(),
        )?;
        BaseToolImpl::create_json_response(&issue)
    }
}
