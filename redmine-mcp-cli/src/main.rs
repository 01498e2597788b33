use std::path::Path;
use std::process;

use redmine_mcp_cli::bootstrap::load_client;
use redmine_mcp_cli::call::run_call_command;
use redmine_mcp_cli::cli::{Cli, Commands};
use redmine_mcp_cli::error::handle_cli_result;
use redmine_mcp_cli::exit_codes::{EXIT_SUCCESS, EXIT_WARNING};
use redmine_mcp_cli::logging;
use redmine_mcp_cli::tools::run_tools_command;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();
    logging::init(cli.debug, cli.quiet);

    let config_path = cli.config.as_deref();
    let exit_code = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            tracing::info!("Starting MCP server");
            run_server(config_path).await
        }
        Commands::Tools { format } => handle_cli_result(run_tools_command(format)),
        Commands::Call { name, args } => {
            tracing::debug!("Calling tool {}", name);
            handle_cli_result(run_call_command(&name, args.as_deref(), config_path).await)
        }
    };

    process::exit(exit_code);
}

async fn run_server(config_path: Option<&Path>) -> i32 {
    use redmine_mcp::mcp::McpServer;
    use rmcp::serve_server;
    use rmcp::transport::io::stdio;
    use tokio_util::sync::CancellationToken;

    let client = match load_client(config_path) {
        Ok(client) => client,
        Err(e) => return handle_cli_result::<()>(Err(e)),
    };
    let server = McpServer::new(client);
    tracing::info!(
        "MCP server ready with {} tools",
        server.registry().len()
    );

    let ct = CancellationToken::new();
    let ct_clone = ct.clone();

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown signal received");
                ct_clone.cancel();
            }
            Err(e) => tracing::error!("Failed to listen for ctrl+c: {}", e),
        }
    });

    match serve_server(server, stdio()).await {
        Ok(running_service) => {
            tracing::info!("MCP server started successfully");

            tokio::select! {
                quit_reason = running_service.waiting() => {
                    match quit_reason {
                        Ok(reason) => tracing::info!("MCP client disconnected: {:?}", reason),
                        Err(e) => {
                            tracing::error!("MCP server task failed: {}", e);
                            return EXIT_WARNING;
                        }
                    }
                }
                _ = ct.cancelled() => {}
            }

            tracing::info!("MCP server exited successfully");
            EXIT_SUCCESS
        }
        Err(e) => {
            tracing::error!("MCP server error: {}", e);
            EXIT_WARNING
        }
    }
}
