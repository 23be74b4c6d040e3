//! Config struct definition and default implementation.

use super::types::*;
use serde::Deserialize;

/// Defaults file for lockrun.
///
/// Every field is optional in the YAML and unknown fields are ignored, so a
/// single file can be shared between jobs that only care about some keys.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Wait for the lock instead of failing on contention.
    pub wait: bool,

    /// Seconds to sleep between attempts while waiting.
    #[serde(default = "default_sleep_seconds")]
    pub sleep_seconds: u64,

    /// Retries per wait loop (0 = unlimited).
    pub retries: u32,

    /// Exit 0 without running anything when the lock is busy.
    pub quiet: bool,

    /// Emit diagnostics on stderr.
    pub verbose: bool,

    /// Seconds to keep waiting for the lock (0 = unlimited).
    pub maxtime_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wait: false,
            sleep_seconds: default_sleep_seconds(),
            retries: 0,
            quiet: false,
            verbose: false,
            maxtime_seconds: 0,
        }
    }
}
