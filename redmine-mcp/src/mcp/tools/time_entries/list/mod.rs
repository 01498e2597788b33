//! Time entry listing tool for MCP operations

use crate::mcp::shared_utils::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use crate::redmine::types::ListTimeEntriesParams;
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::Error as McpError;

/// Tool for listing logged time, filtered by project, user and date range
#[derive(Default)]
pub struct ListTimeEntriesTool;

impl ListTimeEntriesTool {
    /// Creates a new instance of the ListTimeEntriesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListTimeEntriesTool {
    fn name(&self) -> &'static str {
        "get_time_entries"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        BaseToolImpl::schema_for_type::<ListTimeEntriesParams>()
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: ListTimeEntriesParams =
            BaseToolImpl::parse_and_validate(self.name(), arguments)?;

        let entries = McpErrorHandler::handle_result(
            context.client.list_time_entries(&request).await,
            self.name(),
        )?;
        BaseToolImpl::create_json_response(&entries)
    }
}
