//! Issue update tool for MCP operations
//!
//! Only the supplied fields are sent, so an update never resets a field the
//! caller did not mention.

use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::redmine::types::UpdateIssueParams;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for changing fields of an existing issue
#[derive(Default)]
pub struct UpdateIssueTool;

impl UpdateIssueTool {
    /// Creates a new instance of the UpdateIssueTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for UpdateIssueTool {
    fn name(&self) -> &'static str {
        "update_issue"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for_type::<UpdateIssueParams>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: UpdateIssueParams = BaseToolImpl::parse_and_validate(self.name(), arguments)?;

        let outcome = McpErrorHandler::handle_result(
            context
                .client
                .update_issue(request.issue_id, &request.patch)
                .await,
            self.name(),
        )?;
        BaseToolImpl::create_json_response(&outcome)
    }
}
