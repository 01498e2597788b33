//! MCP tools, one module per Redmine resource
//!
//! Each tool lives in `<resource>/<action>/mod.rs` next to the
//! `description.md` shown to MCP clients.

pub mod issues;
pub mod projects;
pub mod time_entries;
pub mod users;
