//! Project listing tool for MCP operations

use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::redmine::types::PageParams;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for listing the projects visible to the configured account
#[derive(Default)]
pub struct ListProjectsTool;

impl ListProjectsTool {
    /// Creates a new instance of the ListProjectsTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListProjectsTool {
    fn name(&self) -> &'static str {
        "get_projects"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for_type::<PageParams>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: PageParams = BaseToolImpl::parse_and_validate(self.name(), arguments)?;

        let projects = McpErrorHandler::handle_result(
            context.client.list_projects(&request.page).await,
            self.name(),
        )?;
        BaseToolImpl::create_json_response(&projects)
    }
}
