//! Value types and defaults used by the configuration layer.

use crate::error::{LockrunError, Result};
use std::time::Duration;

/// Default sleep between lock attempts, in seconds.
pub const DEFAULT_SLEEP_SECONDS: u64 = 10;

pub fn default_sleep_seconds() -> u64 {
    DEFAULT_SLEEP_SECONDS
}

/// How to behave when the lock is busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retry after a sleep instead of giving up at once.
    pub wait: bool,

    /// Pause between attempts while waiting.
    pub sleep_interval: Duration,

    /// Maximum retries while waiting (0 = unlimited).
    pub max_retries: u32,

    /// Wall-clock budget for waiting (zero = unlimited).
    pub max_wait: Duration,

    /// Treat a busy lock as success.
    pub quiet: bool,
}

impl RetryPolicy {
    /// A single attempt, failing loudly on contention.
    pub fn immediate() -> Self {
        Self {
            wait: false,
            sleep_interval: Duration::from_secs(DEFAULT_SLEEP_SECONDS),
            max_retries: 0,
            max_wait: Duration::ZERO,
            quiet: false,
        }
    }

    /// The wait budget, if one is configured.
    pub fn max_wait_limit(&self) -> Option<Duration> {
        (!self.max_wait.is_zero()).then_some(self.max_wait)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::immediate()
    }
}

/// The command to run under the lock: program followed by its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    argv: Vec<String>,
}

impl CommandSpec {
    /// Build a command from an argument vector. The vector must not be empty.
    pub fn new(argv: Vec<String>) -> Result<Self> {
        if argv.is_empty() {
            return Err(LockrunError::Config(
                "missing command to lockrun (must follow \"--\" marker)".to_string(),
            ));
        }
        Ok(Self { argv })
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    pub fn args(&self) -> &[String] {
        &self.argv[1..]
    }

    /// Render the command as a shell-quoted line for messages.
    pub fn display(&self) -> String {
        shell_words::join(&self.argv)
    }
}
