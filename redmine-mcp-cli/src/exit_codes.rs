//! Exit code constants for CLI commands
//!
//! - 0: Success
//! - 1: Runtime failure, including errors reported by Redmine
//! - 2: Configuration or argument errors

/// Successful execution
pub const EXIT_SUCCESS: i32 = 0;

/// Runtime failure such as an unreachable server or a remote error
pub const EXIT_WARNING: i32 = 1;

/// Configuration or argument errors
pub const EXIT_ERROR: i32 = 2;
