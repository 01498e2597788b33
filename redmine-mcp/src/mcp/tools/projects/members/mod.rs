//! Project membership listing tool for MCP operations

use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::redmine::types::ProjectPageParams;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for listing the user and group memberships of a project
#[derive(Default)]
pub struct ProjectMembersTool;

impl ProjectMembersTool {
    /// Creates a new instance of the ProjectMembersTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ProjectMembersTool {
    fn name(&self) -> &'static str {
        "get_project_members"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for_type::<ProjectPageParams>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: ProjectPageParams =
            BaseToolImpl::parse_and_validate(self.name(), arguments)?;

        let members = McpErrorHandler::handle_result(
            context
                .client
                .list_project_members(request.project_id, &request.page)
                .await,
            self.name(),
        )?;
        BaseToolImpl::create_json_response(&members)
    }
}
