//! # Redmine MCP
//!
//! Model Context Protocol tools for the Redmine issue tracker.
//!
//! ## Features
//!
//! - **Tool Registry**: A fixed set of named operations, each with a JSON schema
//!   generated from the same type that validates its arguments
//! - **Resource Adapter**: One method per operation against the Redmine REST API
//! - **MCP Support**: A `ServerHandler` ready to be served over stdio
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use redmine_mcp::{mcp::McpServer, RedmineClient, RedmineConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RedmineConfig::from_env()?;
//! let client = RedmineClient::from_config(&config)?;
//! let server = McpServer::new(client);
//! assert!(server.tool_names().contains(&"get_issues".to_string()));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

/// Configuration loading from the environment and YAML files
pub mod config;

/// Error types for the library
pub mod error;

/// Model Context Protocol (MCP) server support
pub mod mcp;

/// Redmine REST API access
pub mod redmine;

pub use config::{ConfigError, RedmineConfig};
pub use error::{RedmineMcpError, Result};
pub use redmine::client::RedmineClient;
pub use redmine::transport::{HttpTransport, RedmineTransport, RemoteRequest};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
