//! Time entry activity listing tool for MCP operations

use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::redmine::types::NoParams;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for listing the activities time can be logged under
#[derive(Default)]
pub struct TimeEntryActivitiesTool;

impl TimeEntryActivitiesTool {
    /// Creates a new instance of the TimeEntryActivitiesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for TimeEntryActivitiesTool {
    fn name(&self) -> &'static str {
        "get_time_entry_activities"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for_type::<NoParams>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let _request: NoParams = BaseToolImpl::parse_and_validate(self.name(), arguments)?;

        let activities = McpErrorHandler::handle_result(
            context.client.list_time_entry_activities().await,
            self.name(),
        )?;
        BaseToolImpl::create_json_response(&activities)
    }
}
