//! One-shot tool invocation

use crate::bootstrap::load_client;
use crate::error::{CliError, CliResult};
use crate::exit_codes::EXIT_ERROR;
use redmine_mcp::mcp::{create_tool_registry, McpServer};
use redmine_mcp::RedmineMcpError;
use rmcp::model::RawContent;
use serde_json::{Map, Value};
use std::path::Path;

/// Parse `--args`; an absent value is an empty object
pub fn parse_call_arguments(raw: Option<&str>) -> CliResult<Map<String, Value>> {
    let Some(raw) = raw else {
        return Ok(Map::new());
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(CliError::new(
            format!("--args must be a JSON object, got {other}"),
            EXIT_ERROR,
        )),
        Err(e) => Err(CliError::new(
            format!("--args is not valid JSON: {e}"),
            EXIT_ERROR,
        )),
    }
}

/// Invoke `name` once and print the result on stdout
///
/// The tool name and arguments are checked before any configuration is
/// loaded.
pub async fn run_call_command(
    name: &str,
    args: Option<&str>,
    config_path: Option<&Path>,
) -> CliResult<()> {
    if create_tool_registry().get_tool(name).is_none() {
        return Err(CliError::validation(RedmineMcpError::UnknownOperation(
            name.to_string(),
        )));
    }
    let arguments = parse_call_arguments(args)?;

    let server = McpServer::new(load_client(config_path)?);
    let result = server
        .invoke(name, Some(arguments))
        .await
        .map_err(CliError::from_tool_error)?;

    for content in &result.content {
        if let RawContent::Text(text) = &content.raw {
            println!("{}", text.text);
        }
    }
    Ok(())
}
