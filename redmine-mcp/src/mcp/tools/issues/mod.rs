//! Issue tools for MCP operations
//!
//! Read tools:
//! - **list** (`get_issues`): filtered, paginated issue listing
//! - **get** (`get_issue`): one issue with journals, attachments and relations
//! - **search** (`search_issues`): substring match on the issue subject
//!
//! Write tools:
//! - **create** (`create_issue`)
//! - **update** (`update_issue`): sparse update, omitted fields stay untouched
//! - **comment** (`add_comment`): note only, never touches other fields
//! - **delete** (`delete_issue`)

pub mod comment;
pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod search;
pub mod update;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all issue-related tools with the registry
pub fn register_issue_tools(registry: &mut ToolRegistry) {
    registry.register(list::ListIssuesTool::new());
    registry.register(get::GetIssueTool::new());
    registry.register(search::SearchIssuesTool::new());
    registry.register(create::CreateIssueTool::new());
    registry.register(update::UpdateIssueTool::new());
    registry.register(comment::AddCommentTool::new());
    registry.register(delete::DeleteIssueTool::new());
}
