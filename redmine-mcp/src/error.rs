//! Unified error handling for the Redmine MCP library
//!
//! Every failure the adapter can produce is one of the variants below, so the
//! MCP layer can decide between a client error and a server error without
//! inspecting message text.

use crate::config::ConfigError;
use thiserror::Error;

/// The main error type for the Redmine MCP library
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RedmineMcpError {
    /// Arguments failed schema validation or a local precondition
    #[error("Invalid arguments for {operation}: {message}")]
    Validation {
        /// Operation whose arguments were rejected
        operation: String,
        /// Which field failed and why
        message: String,
    },

    /// Requested operation is not registered
    #[error("Unknown tool: {0}")]
    UnknownOperation(String),

    /// The remote service reported that a scoped resource does not exist
    #[error("{} {id} not found", capitalize(.resource))]
    NotFound {
        /// Kind of resource, e.g. "project"
        resource: &'static str,
        /// Identifier that was looked up
        id: u64,
    },

    /// The remote service answered with a non-success status
    #[error("Redmine returned status {status}: {body}")]
    Remote {
        /// HTTP status code
        status: u16,
        /// Response body as text, possibly empty
        body: String,
    },

    /// The request could not be sent or the response could not be read
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Error annotated with the operation that produced it
    #[error("Error executing {operation}: {source}")]
    Context {
        /// Operation name plus relevant ids
        operation: String,
        /// Underlying failure
        #[source]
        source: Box<RedmineMcpError>,
    },
}

/// Result type alias for Redmine MCP operations
pub type Result<T> = std::result::Result<T, RedmineMcpError>;

impl RedmineMcpError {
    /// Create a validation error for an operation
    pub fn validation(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Wrap this error with the name of the operation that failed
    pub fn in_operation(self, operation: impl Into<String>) -> Self {
        match self {
            // Local errors already carry enough context
            err @ (Self::Validation { .. } | Self::UnknownOperation(_) | Self::NotFound { .. }) => {
                err
            }
            err => Self::Context {
                operation: operation.into(),
                source: Box::new(err),
            },
        }
    }

    /// The innermost error, skipping any operation annotations
    pub fn root(&self) -> &RedmineMcpError {
        match self {
            Self::Context { source, .. } => source.root(),
            err => err,
        }
    }

    /// HTTP status of the remote failure, if this was one
    pub fn remote_status(&self) -> Option<u16> {
        match self.root() {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this error was caused by the caller rather than the remote service
    pub fn is_client_error(&self) -> bool {
        matches!(
            self.root(),
            Self::Validation { .. } | Self::UnknownOperation(_) | Self::NotFound { .. }
        )
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
