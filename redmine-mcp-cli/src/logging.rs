//! Logging setup for the CLI
//!
//! Logs always go to stderr; stdout is reserved for the MCP protocol and for
//! command output.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set
pub fn default_directive(debug: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if debug {
        "redmine_mcp=debug,redmine_mcp_cli=debug,warn"
    } else {
        "redmine_mcp=info,redmine_mcp_cli=info,warn"
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` wins over the flags. Colors are disabled when stderr is not a
/// terminal, which is the case when an MCP client spawns the server.
pub fn init(debug: bool, quiet: bool) {
    use is_terminal::IsTerminal;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug, quiet)));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}
