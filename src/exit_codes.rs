//! Exit code constants for the lockrun CLI.
//!
//! - 0: Success (child exited 0, or quiet skip on contention)
//! - 1: Any internal fatal error (bad args, preflight, contention, launch)
//! - 128 + n: Child was terminated by signal `n`
//!
//! Any other value is the child's own exit code, passed through.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Internal fatal error.
pub const FAILURE: i32 = 1;

/// Base added to a signal number when the child dies from a signal.
pub const SIGNAL_BASE: i32 = 128;
