//! Time tracking tools for MCP operations
//!
//! - **list** (`get_time_entries`): logged time with optional filters
//! - **log** (`log_time`): record hours against an issue or project
//! - **activities** (`get_time_entry_activities`): activity catalogue

pub mod activities;
pub mod list;
pub mod log;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all time tracking tools with the registry
pub fn register_time_entry_tools(registry: &mut ToolRegistry) {
    registry.register(list::ListTimeEntriesTool::new());
    registry.register(log::LogTimeTool::new());
    registry.register(activities::TimeEntryActivitiesTool::new());
}
