//! Issue comment tool for MCP operations

use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::redmine::types::AddCommentParams;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for adding a note to an issue
///
/// Arguments other than `issue_id` and `notes` are ignored.
#[derive(Default)]
pub struct AddCommentTool;

impl AddCommentTool {
    /// Creates a new instance of the AddCommentTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for AddCommentTool {
    fn name(&self) -> &'static str {
        "add_comment"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for_type::<AddCommentParams>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: AddCommentParams = BaseToolImpl::parse_and_validate(self.name(), arguments)?;

        let outcome = McpErrorHandler::handle_result(
            context
                .client
                .add_comment(request.issue_id, &request.notes)
                .await,
            self.name(),
        )?;
        BaseToolImpl::create_json_response(&outcome)
    }
}
