//! Tool registry for MCP operations
//!
//! Every Redmine operation is a [`McpTool`] registered under a unique name.
//! The registry answers capability listing and lookup; tools are registered
//! once at startup and never change afterwards.

use super::shared_utils::McpErrorHandler;
use crate::redmine::types::Validate;
use crate::redmine::RedmineClient;
use crate::RedmineMcpError;
use rmcp::model::{Annotated, CallToolResult, RawContent, RawTextContent, Tool};
use rmcp::Error as McpError;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Context shared by all tools during execution
#[derive(Clone, Debug)]
pub struct ToolContext {
    /// Client used for every remote call
    pub client: Arc<RedmineClient>,
}

impl ToolContext {
    /// Create a new tool context
    pub fn new(client: Arc<RedmineClient>) -> Self {
        Self { client }
    }
}

/// Trait defining the interface for all MCP tools
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Get the tool's name
    fn name(&self) -> &'static str;

    /// Get the tool's description
    fn description(&self) -> &'static str;

    /// Get the tool's JSON schema for arguments
    fn schema(&self) -> serde_json::Value;

    /// Execute the tool with the given arguments and context
    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError>;
}

/// Registry for managing MCP tools
///
/// Listing preserves registration order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn McpTool>>,
    order: Vec<String>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool in the registry, replacing any tool with the same name
    pub fn register<T: McpTool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), Box::new(tool)).is_none() {
            self.order.push(name);
        }
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    /// Argument schema of a registered tool
    pub fn schema_for(&self, name: &str) -> Option<serde_json::Value> {
        self.get_tool(name).map(|tool| tool.schema())
    }

    /// List all registered tool names in registration order
    pub fn list_tool_names(&self) -> Vec<String> {
        self.order.clone()
    }

    /// Get all registered tools as Tool objects for MCP list_tools response
    pub fn list_tools(&self) -> Vec<Tool> {
        self.order
            .iter()
            .filter_map(|name| self.get_tool(name))
            .map(|tool| {
                let schema_map = match tool.schema() {
                    serde_json::Value::Object(map) => map,
                    _ => serde_json::Map::new(),
                };

                Tool {
                    name: tool.name().into(),
                    description: Some(tool.description().into()),
                    input_schema: Arc::new(schema_map),
                    annotations: None,
                }
            })
            .collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Register all issue-related tools with the registry
pub fn register_issue_tools(registry: &mut ToolRegistry) {
    use super::tools::issues;
    issues::register_issue_tools(registry);
}

/// Register all project-related tools with the registry
pub fn register_project_tools(registry: &mut ToolRegistry) {
    use super::tools::projects;
    projects::register_project_tools(registry);
}

/// Register all user-related tools with the registry
pub fn register_user_tools(registry: &mut ToolRegistry) {
    use super::tools::users;
    users::register_user_tools(registry);
}

/// Register all time tracking tools with the registry
pub fn register_time_entry_tools(registry: &mut ToolRegistry) {
    use super::tools::time_entries;
    time_entries::register_time_entry_tools(registry);
}

/// Build a registry holding every Redmine tool
///
/// Registration order is issues, projects, users, then time tracking.
pub fn create_tool_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_issue_tools(&mut registry);
    register_project_tools(&mut registry);
    register_user_tools(&mut registry);
    register_time_entry_tools(&mut registry);
    registry
}

/// Base implementation providing common utility methods for MCP tools
pub struct BaseToolImpl;

impl BaseToolImpl {
    /// Parse tool arguments from a JSON map into a typed struct
    ///
    /// Explicit `null` values behave like omitted fields.
    pub fn parse_arguments<T: DeserializeOwned>(
        operation: &str,
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> crate::Result<T> {
        serde_json::from_value(serde_json::Value::Object(arguments))
            .map_err(|e| RedmineMcpError::validation(operation, e.to_string()))
    }

    /// Parse and validate tool arguments, mapping failures to MCP errors
    pub fn parse_and_validate<T: DeserializeOwned + Validate>(
        operation: &str,
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> std::result::Result<T, McpError> {
        Self::parse_arguments::<T>(operation, arguments)
            .and_then(|request| request.validate(operation).map(|_| request))
            .map_err(|e| McpErrorHandler::handle_error(e, operation))
    }

    /// JSON schema of an argument type, inlined and without null variants
    pub fn schema_for_type<T: JsonSchema>() -> serde_json::Value {
        let generator = schemars::gen::SchemaSettings::draft07()
            .with(|settings| {
                settings.option_nullable = false;
                settings.option_add_null_type = false;
                settings.inline_subschemas = true;
            })
            .into_generator();
        let schema = generator.into_root_schema_for::<T>();

        match serde_json::to_value(schema) {
            Ok(serde_json::Value::Object(mut map)) => {
                map.remove("$schema");
                map.remove("title");
                map.remove("description");
                map.remove("definitions");
                serde_json::Value::Object(map)
            }
            _ => serde_json::json!({ "type": "object" }),
        }
    }

    /// Create a success response with text content
    pub fn create_success_response<T: Into<String>>(content: T) -> CallToolResult {
        CallToolResult {
            content: vec![Annotated::new(
                RawContent::Text(RawTextContent {
                    text: content.into(),
                }),
                None,
            )],
            is_error: Some(false),
        }
    }

    /// Create a success response holding pretty-printed JSON
    pub fn create_json_response<T: Serialize>(
        value: &T,
    ) -> std::result::Result<CallToolResult, McpError> {
        serde_json::to_string_pretty(value)
            .map(Self::create_success_response)
            .map_err(|e| McpError::internal_error(format!("Failed to serialize result: {e}"), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redmine::mock_transport::MockTransport;
    use crate::redmine::types::{ListIssuesParams, ProjectPageParams};
    use rmcp::model::ErrorCode;

    /// Mock tool for testing
    struct MockTool {
        name: &'static str,
        description: &'static str,
    }

    #[async_trait::async_trait]
    impl McpTool for MockTool {
        fn name(&self) -> &'static str {
            self.name
        }

        fn description(&self) -> &'static str {
            self.description
        }

        fn schema(&self) -> serde_json::Value {
            serde_json::json!({
                "type": "object",
                "properties": {},
                "required": []
            })
        }

        async fn execute(
            &self,
            _arguments: serde_json::Map<String, serde_json::Value>,
            _context: &ToolContext,
        ) -> std::result::Result<CallToolResult, McpError> {
            Ok(BaseToolImpl::create_success_response(format!(
                "Mock tool {} executed",
                self.name
            )))
        }
    }

    fn mock_context() -> ToolContext {
        let client = RedmineClient::new(Arc::new(MockTransport::new()));
        ToolContext::new(Arc::new(client))
    }

    #[test]
    fn test_tool_registry_creation() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_tool_registration_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(MockTool {
            name: "test_tool",
            description: "A test tool",
        });

        assert_eq!(registry.len(), 1);
        let tool = registry.get_tool("test_tool").unwrap();
        assert_eq!(tool.description(), "A test tool");
        assert!(registry.get_tool("nonexistent").is_none());
        assert!(registry.schema_for("test_tool").is_some());
        assert!(registry.schema_for("nonexistent").is_none());
    }

    #[test]
    fn test_listing_keeps_registration_order() {
        let mut registry = ToolRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry.register(MockTool {
                name,
                description: "ordered",
            });
        }
        registry.register(MockTool {
            name: "alpha",
            description: "replaced",
        });

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.list_tool_names(), vec!["zeta", "alpha", "mid"]);

        let listed: Vec<String> = registry
            .list_tools()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        assert_eq!(listed, vec!["zeta", "alpha", "mid"]);
        assert_eq!(registry.get_tool("alpha").unwrap().description(), "replaced");
    }

    #[tokio::test]
    async fn test_tool_execution() {
        let tool = MockTool {
            name: "exec_test",
            description: "Execution test tool",
        };

        let result = tool
            .execute(serde_json::Map::new(), &mock_context())
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(false));
        assert!(!result.content.is_empty());
    }

    #[test]
    fn test_parse_and_validate_rejects_out_of_range_limit() {
        let mut args = serde_json::Map::new();
        args.insert("limit".to_string(), serde_json::json!(101));

        let err = BaseToolImpl::parse_and_validate::<ListIssuesParams>("get_issues", args)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("limit"));
    }

    #[test]
    fn test_parse_and_validate_reports_missing_field() {
        let err = BaseToolImpl::parse_and_validate::<ProjectPageParams>(
            "get_users",
            serde_json::Map::new(),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("project_id"));
    }

    #[test]
    fn test_schema_for_type_is_inlined() {
        let schema = BaseToolImpl::schema_for_type::<ListIssuesParams>();

        assert_eq!(schema["type"], "object");
        assert!(schema.get("$schema").is_none());
        assert!(schema.get("definitions").is_none());
        assert!(schema.get("description").is_none());
        let properties = schema["properties"].as_object().unwrap();
        for field in ["project_id", "status_id", "assigned_to_id", "limit", "offset"] {
            assert!(properties.contains_key(field), "missing {field}");
        }
        assert!(!schema.to_string().contains("$ref"));
    }

    #[test]
    fn test_field_descriptions_survive_root_stripping() {
        let schema = BaseToolImpl::schema_for_type::<ProjectPageParams>();
        assert!(schema.get("description").is_none());
        assert!(schema["properties"]["project_id"]["description"].is_string());
    }

    #[test]
    fn test_schema_marks_required_fields() {
        let schema = BaseToolImpl::schema_for_type::<ProjectPageParams>();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        assert_eq!(required, vec!["project_id"]);
    }

    #[test]
    fn test_create_json_response() {
        let response =
            BaseToolImpl::create_json_response(&serde_json::json!({"id": 1})).unwrap();

        assert_eq!(response.is_error, Some(false));
        if let RawContent::Text(text_content) = &response.content[0].raw {
            let parsed: serde_json::Value = serde_json::from_str(&text_content.text).unwrap();
            assert_eq!(parsed, serde_json::json!({"id": 1}));
        } else {
            panic!("Expected text content");
        }
    }
}
