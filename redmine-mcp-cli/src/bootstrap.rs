//! Building a Redmine client from the configured settings

use crate::error::{CliResult, IntoCliResult};
use redmine_mcp::{RedmineClient, RedmineConfig};
use std::path::Path;

/// Load settings and build an HTTP client
///
/// Any configuration problem is reported with exit code 2 before a single
/// request is made.
pub fn load_client(config_path: Option<&Path>) -> CliResult<RedmineClient> {
    let config = RedmineConfig::load(config_path).cli_validation_error()?;
    tracing::info!("Using Redmine at {} as {}", config.url, config.username);
    RedmineClient::from_config(&config).cli_validation_error()
}
