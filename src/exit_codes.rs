//! Exit code constants for the bpcheck CLI.
//!
//! - 0: Success
//! - 1: User error (unreadable file, malformed YAML, bad flags)
//! - 2: Validation failure (any ERROR-level outcome in the pipeline)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: unreadable input, undecodable YAML, or invalid arguments.
pub const USER_ERROR: i32 = 1;

/// Validation failure: structural, settings, or validator errors.
pub const VALIDATION_FAILURE: i32 = 2;
