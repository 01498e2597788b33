//! Shared utilities for MCP operations
//!
//! Error mapping used by every tool so the caller sees the same shape of
//! error for the same kind of failure.

use crate::RedmineMcpError;
use rmcp::Error as McpError;
use serde_json::json;

/// Common error handling patterns for MCP operations
pub struct McpErrorHandler;

impl McpErrorHandler {
    /// Convert a library error to the matching MCP error
    ///
    /// - Argument problems and unknown projects -> invalid_params
    /// - Unknown tool names -> invalid_request
    /// - Remote, transport and serialization failures -> internal_error
    pub fn handle_error(error: RedmineMcpError, operation: &str) -> McpError {
        tracing::error!("MCP operation '{}' failed: {}", operation, error);

        match error {
            err @ (RedmineMcpError::Validation { .. } | RedmineMcpError::NotFound { .. }) => {
                McpError::invalid_params(err.to_string(), None)
            }
            err @ RedmineMcpError::UnknownOperation(_) => {
                McpError::invalid_request(err.to_string(), None)
            }
            err @ RedmineMcpError::Context { .. } => Self::internal(&err),
            err => Self::internal(&RedmineMcpError::Context {
                operation: operation.to_string(),
                source: Box::new(err),
            }),
        }
    }

    /// Handle results with consistent error mapping
    pub fn handle_result<T>(
        result: crate::Result<T>,
        operation: &str,
    ) -> std::result::Result<T, McpError> {
        result.map_err(|e| Self::handle_error(e, operation))
    }

    fn internal(error: &RedmineMcpError) -> McpError {
        let data = match error.root() {
            RedmineMcpError::Remote { status, body } => Some(json!({
                "status": status,
                "body": body,
            })),
            _ => None,
        };
        McpError::internal_error(error.to_string(), data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::ErrorCode;

    #[test]
    fn test_validation_maps_to_invalid_params() {
        let err = McpErrorHandler::handle_error(
            RedmineMcpError::validation("get_issues", "limit must be between 1 and 100, got 0"),
            "get_issues",
        );
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("limit"));
    }

    #[test]
    fn test_unknown_tool_maps_to_invalid_request() {
        let err = McpErrorHandler::handle_error(
            RedmineMcpError::UnknownOperation("frobnicate".to_string()),
            "frobnicate",
        );
        assert_eq!(err.code, ErrorCode::INVALID_REQUEST);
        assert_eq!(err.message, "Unknown tool: frobnicate");
    }

    #[test]
    fn test_not_found_maps_to_invalid_params() {
        let err = McpErrorHandler::handle_error(
            RedmineMcpError::NotFound {
                resource: "project",
                id: 99,
            },
            "get_project",
        );
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("99"));
    }

    #[test]
    fn test_remote_error_carries_status_and_body() {
        let err = McpErrorHandler::handle_error(
            RedmineMcpError::Remote {
                status: 422,
                body: "bad".to_string(),
            },
            "log_time",
        );
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert!(err.message.starts_with("Error executing log_time"));
        assert_eq!(err.data, Some(json!({"status": 422, "body": "bad"})));
    }

    #[test]
    fn test_annotated_error_is_not_wrapped_twice() {
        let err = McpErrorHandler::handle_error(
            RedmineMcpError::Transport("connection refused".to_string())
                .in_operation("get_issue (issue 5)"),
            "get_issue",
        );
        assert_eq!(
            err.message,
            "Error executing get_issue (issue 5): Transport error: connection refused"
        );
    }
}
