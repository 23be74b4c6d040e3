//! Error types for the lockrun CLI.
//!
//! Uses thiserror for derive macros and provides one-line, user-actionable
//! error messages. Lock contention is only an error when `--quiet` is off.

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for lockrun operations.
#[derive(Error, Debug)]
pub enum LockrunError {
    /// Missing or invalid arguments/configuration. The lock is never touched.
    #[error("{0}")]
    Config(String),

    /// The lock path cannot be used (directory, unwritable parent, ...).
    #[error("cannot open({}) [err={reason}]", .path.display())]
    PathUnusable { path: PathBuf, reason: String },

    /// The lock is held by someone else and we were not told to be quiet.
    #[error("cannot launch {command} - run is locked{}", attempts_suffix(.attempts))]
    Locked {
        command: String,
        attempts: Option<u32>,
    },

    /// The child process could not be started.
    #[error("cannot launch {program} [{source}]")]
    LaunchFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on a running child failed.
    #[error("failed to wait for process {pid}: {source}")]
    Wait {
        pid: u32,
        #[source]
        source: std::io::Error,
    },
}

fn attempts_suffix(attempts: &Option<u32>) -> String {
    match attempts {
        Some(n) => format!(" (after {} attempts)", n),
        None => String::new(),
    }
}

impl LockrunError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            LockrunError::Config(_) => exit_codes::FAILURE,
            LockrunError::PathUnusable { .. } => exit_codes::FAILURE,
            LockrunError::Locked { .. } => exit_codes::FAILURE,
            LockrunError::LaunchFailed { .. } => exit_codes::FAILURE,
            LockrunError::Wait { .. } => exit_codes::FAILURE,
        }
    }
}

/// Result type alias for lockrun operations.
pub type Result<T> = std::result::Result<T, LockrunError>;
