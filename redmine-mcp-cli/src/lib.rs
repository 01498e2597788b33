//! Redmine MCP CLI Library
//!
//! Command-line definitions and command implementations for the
//! `redmine-mcp` binary. Exposed as a library so integration tests can reach
//! the argument parser and exit codes.

/// Client construction from configuration
pub mod bootstrap;
/// One-shot tool invocation
pub mod call;
/// Command-line interface definitions and argument parsing
pub mod cli;
/// CLI error type carrying an exit code
pub mod error;
/// Exit codes used by the CLI application
pub mod exit_codes;
/// Logging setup
pub mod logging;
/// Tool catalogue output
pub mod tools;
