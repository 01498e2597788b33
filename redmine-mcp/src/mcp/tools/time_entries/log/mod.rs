//! Time logging tool for MCP operations

use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::redmine::types::LogTimeParams;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for logging hours against an issue or project
#[derive(Default)]
pub struct LogTimeTool;

impl LogTimeTool {
    /// Creates a new instance of the LogTimeTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for LogTimeTool {
    fn name(&self) -> &'static str {
        "log_time"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for_type::<LogTimeParams>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: LogTimeParams = BaseToolImpl::parse_and_validate(self.name(), arguments)?;

        let entry = McpErrorHandler::handle_result(
            context.client.log_time(&request).await,
            self.name(),
        )?;
        BaseToolImpl::create_json_response(&entry)
    }
}
