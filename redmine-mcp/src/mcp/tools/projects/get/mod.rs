//! Single project retrieval tool for MCP operations

use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::redmine::types::ProjectIdParams;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for retrieving one project by ID
#[derive(Default)]
pub struct GetProjectTool;

impl GetProjectTool {
    /// Creates a new instance of the GetProjectTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GetProjectTool {
    fn name(&self) -> &'static str {
        "get_project"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for_type::<ProjectIdParams>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: ProjectIdParams = BaseToolImpl::parse_and_validate(self.name(), arguments)?;

        let project = McpErrorHandler::handle_result(
            context.client.get_project(request.project_id).await,
            self.name(),
        )?;
        BaseToolImpl::create_json_response(&project)
    }
}
