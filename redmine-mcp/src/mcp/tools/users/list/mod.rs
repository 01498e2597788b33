//! Project user listing tool for MCP operations
//!
//! Users are read from the memberships of a project; a project is required.

use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::redmine::types::ProjectPageParams;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for listing the users that belong to a project
#[derive(Default)]
pub struct ListUsersTool;

impl ListUsersTool {
    /// Creates a new instance of the ListUsersTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListUsersTool {
    fn name(&self) -> &'static str {
        "get_users"
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

        let users = McpErrorHandler::handle_result(
            context
                .client
                .list_project_users(request.project_id, &request.page)
                .await,
            self.name(),
        )?;

        tracing::debug!(
            "Project {} has {} users on this page",
            request.project_id,
            users.users.len()
        );
        BaseToolImpl::create_json_response(&users)
    }
}
