use clap::{Parser, Subcommand, ValueEnum};
use is_terminal::IsTerminal;
use std::io;
use std::path::PathBuf;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "redmine-mcp")]
#[command(version)]
#[command(about = "An MCP server exposing Redmine issues, projects and time tracking")]
#[command(long_about = "
redmine-mcp is an MCP (Model Context Protocol) server that lets an AI agent
read and change a Redmine instance: issues, projects, memberships, versions
and time entries.

Connection settings are read from REDMINE_URL, REDMINE_API_KEY,
REDMINE_USERNAME and REDMINE_PASSWORD, from a .env file in the working
directory, or from a YAML file given with --config.

Example usage:
  redmine-mcp                      # Run as MCP server over stdio
  redmine-mcp tools                # List the available tools
  redmine-mcp call get_issue --args '{\"issue_id\": 42}'
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// YAML file with url, api_key, username and password
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Run as MCP server over stdio (default)
    #[command(long_about = "
Runs redmine-mcp as an MCP server on stdin/stdout. This is the default when
no subcommand is given. The server stops when the client disconnects or on
Ctrl-C. Logs go to stderr.

Missing connection settings are reported before the server starts, with
exit code 2.

Example:
  redmine-mcp serve
  redmine-mcp serve --config ~/.config/redmine-mcp.yaml
")]
    Serve,
    /// List the available tools
    #[command(long_about = "
Lists every tool with its description and argument schema. No connection
settings are needed.

Output formats:
  table  - Formatted table (default)
  json   - MCP tool descriptors for scripting

Examples:
  redmine-mcp tools
  redmine-mcp tools --format json
")]
    Tools {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Invoke one tool and print its result
    #[command(long_about = "
Invokes a single tool against the configured Redmine instance and prints the
JSON result on stdout.

Exit codes:
  0 - Success
  1 - Redmine or the network reported an error
  2 - Unknown tool, invalid arguments or missing configuration

Examples:
  redmine-mcp call get_projects
  redmine-mcp call get_issues --args '{\"project_id\": 1, \"status_id\": \"open\"}'
  redmine-mcp call add_comment --args '{\"issue_id\": 42, \"notes\": \"Deployed\"}'
")]
    Call {
        /// Tool name, e.g. get_issues
        name: String,

        /// Tool arguments as a JSON object
        #[arg(short, long, value_name = "JSON")]
        args: Option<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn try_parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(args)
    }

    pub fn is_tty() -> bool {
        io::stdout().is_terminal()
    }

    pub fn should_use_color() -> bool {
        Self::is_tty() && std::env::var("NO_COLOR").is_err()
    }
}
