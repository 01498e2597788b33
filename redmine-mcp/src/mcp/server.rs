//! MCP server exposing the Redmine tools

use crate::redmine::RedmineClient;
use crate::RedmineMcpError;
use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{Error as McpError, RoleServer, ServerHandler};
use std::sync::Arc;

use super::shared_utils::McpErrorHandler;
use super::tool_registry::{create_tool_registry, ToolContext, ToolRegistry};

const SERVER_NAME: &str = "redmine-mcp";

const INSTRUCTIONS: &str = "Access to a Redmine instance. Use get_issues, get_issue and \
search_issues to read issues, create_issue, update_issue, add_comment and delete_issue to \
change them. Projects, their members, versions and users are available through get_projects, \
get_project, get_project_members, get_project_versions and get_users. Time tracking is \
available through get_time_entries, log_time and get_time_entry_activities.";

/// MCP server dispatching tool calls to a [`RedmineClient`]
#[derive(Clone)]
pub struct McpServer {
    tool_registry: Arc<ToolRegistry>,
    /// Tool context containing shared state for tool execution
    pub tool_context: Arc<ToolContext>,
}

impl McpServer {
    /// Create a new MCP server with every Redmine tool registered
    pub fn new(client: RedmineClient) -> Self {
        Self {
            tool_registry: Arc::new(create_tool_registry()),
            tool_context: Arc::new(ToolContext::new(Arc::new(client))),
        }
    }

    /// The registry backing this server
    pub fn registry(&self) -> &ToolRegistry {
        &self.tool_registry
    }

    /// Names of all tools in registration order
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_registry.list_tool_names()
    }

    /// Published tool descriptors
    pub fn list_operations(&self) -> Vec<Tool> {
        self.tool_registry.list_tools()
    }

    /// Invoke a tool by name
    ///
    /// Unknown names are rejected before any argument is looked at; missing
    /// arguments behave like an empty object.
    pub async fn invoke(
        &self,
        name: &str,
        arguments: Option<serde_json::Map<String, serde_json::Value>>,
    ) -> std::result::Result<CallToolResult, McpError> {
        match self.tool_registry.get_tool(name) {
            Some(tool) => {
                tracing::debug!("Executing tool '{}'", name);
                tool.execute(arguments.unwrap_or_default(), &self.tool_context)
                    .await
            }
            None => Err(McpErrorHandler::handle_error(
                RedmineMcpError::UnknownOperation(name.to_string()),
                name,
            )),
        }
    }
}

impl ServerHandler for McpServer {
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.list_operations(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        self.invoke(&request.name, request.arguments).await
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities {
                prompts: None,
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
                resources: None,
                logging: None,
                completions: None,
                experimental: None,
            },
            server_info: Implementation {
                name: SERVER_NAME.into(),
                version: crate::VERSION.into(),
            },
            instructions: Some(INSTRUCTIONS.into()),
        }
    }
}
