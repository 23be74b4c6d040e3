//! Resolution of command-line arguments and the defaults file into one run.

use super::model::Config;
use super::types::{CommandSpec, RetryPolicy};
use crate::cli::Cli;
use crate::error::{LockrunError, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Everything the runner needs, validated and immutable.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Path naming the mutual-exclusion domain.
    pub lock_path: PathBuf,

    /// Command to run once the lock is held.
    pub command: CommandSpec,

    /// Contention behaviour.
    pub policy: RetryPolicy,

    /// Whether diagnostics go to stderr.
    pub verbose: bool,
}

impl Invocation {
    /// Validate parsed arguments and merge them over the defaults file.
    ///
    /// Checks run in order: lock path, command, then the config file, so the
    /// most basic usage mistake is the one reported.
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let lock_path = cli
            .lockfile
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| LockrunError::Config("missing --lockfile=F parameter".to_string()))?;

        let command = CommandSpec::new(cli.command)?;

        let config = match &cli.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        let policy = RetryPolicy {
            wait: switch(cli.wait, cli.no_wait, config.wait),
            sleep_interval: Duration::from_secs(cli.sleep.unwrap_or(config.sleep_seconds)),
            max_retries: cli.retries.unwrap_or(config.retries),
            max_wait: Duration::from_secs(cli.maxtime.unwrap_or(config.maxtime_seconds)),
            quiet: switch(cli.quiet, cli.no_quiet, config.quiet),
        };

        if policy.wait && policy.sleep_interval.is_zero() {
            return Err(LockrunError::Config(
                "--sleep must be greater than 0 when --wait is given".to_string(),
            ));
        }

        Ok(Self {
            lock_path,
            command,
            policy,
            verbose: switch(cli.verbose, cli.no_verbose, config.verbose),
        })
    }
}

/// Resolve an on/off flag pair against the file value.
fn switch(on: bool, off: bool, file: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        file
    }
}
