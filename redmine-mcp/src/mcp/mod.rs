//! Model Context Protocol (MCP) server support
//!
//! Exposes the Redmine operations as MCP tools. Each tool lives in its own
//! module under [`tools`] and is registered with a [`ToolRegistry`] when the
//! server starts.

pub mod server;
pub mod shared_utils;
pub mod tool_registry;
pub mod tools;

pub use server::McpServer;
pub use tool_registry::{
    create_tool_registry, register_issue_tools, register_project_tools,
    register_time_entry_tools, register_user_tools, BaseToolImpl, McpTool, ToolContext,
    ToolRegistry,
};
