//! Project tools for MCP operations
//!
//! - **list** (`get_projects`): paginated project listing
//! - **get** (`get_project`): one project by ID
//! - **members** (`get_project_members`): user and group memberships
//! - **versions** (`get_project_versions`): versions with a computed count

pub mod get;
pub mod list;
pub mod members;
pub mod versions;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all project-related tools with the registry
pub fn register_project_tools(registry: &mut ToolRegistry) {
    registry.register(list::ListProjectsTool::new());
    registry.register(get::GetProjectTool::new());
    registry.register(members::ProjectMembersTool::new());
    registry.register(versions::ProjectVersionsTool::new());
}
