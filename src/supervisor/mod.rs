//! Child process supervisor.
//!
//! Runs the command with the standard streams inherited, blocks until it
//! exits, and reports how it ended.

use crate::config::CommandSpec;
use crate::error::{LockrunError, Result};
use crate::exit_codes;
use std::process::{Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

/// How the child ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Normal exit with a status code.
    Exited(i32),
    /// Killed by a signal.
    Signaled(i32),
    /// Neither a code nor a signal was reported.
    Unknown,
}

impl Termination {
    fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Termination::Exited(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Termination::Signaled(signal);
            }
        }

        Termination::Unknown
    }
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Termination::Exited(code) => write!(f, "status {}", code),
            Termination::Signaled(signal) => write!(f, "signal {}", signal),
            Termination::Unknown => write!(f, "unknown status"),
        }
    }
}

/// Result of running the child to completion.
#[derive(Debug, Clone)]
pub struct ExitOutcome {
    /// Process ID of the child.
    pub pid: u32,
    /// How it ended.
    pub termination: Termination,
    /// Wall-clock time since the supervisor's start instant.
    pub elapsed: Duration,
}

impl ExitOutcome {
    /// Exit code lockrun should finish with.
    ///
    /// Signals map to `128 + n`, as shells report them.
    pub fn exit_code(&self) -> i32 {
        match self.termination {
            Termination::Exited(code) => code,
            Termination::Signaled(signal) => exit_codes::SIGNAL_BASE + signal,
            Termination::Unknown => exit_codes::FAILURE,
        }
    }
}

/// Launches and reaps the child.
#[derive(Debug, Clone, Copy)]
pub struct Supervisor {
    started: Instant,
    ceiling: Option<Duration>,
}

impl Supervisor {
    /// `started` is when the whole run began (including time spent waiting
    /// for the lock). `ceiling` is the `--maxtime` budget, used only for
    /// reporting here.
    pub fn new(started: Instant, ceiling: Option<Duration>) -> Self {
        Self { started, ceiling }
    }

    /// Run `command` and wait for it to exit.
    pub fn run(&self, command: &CommandSpec) -> Result<ExitOutcome> {
        let mut child = Command::new(command.program())
            .args(command.args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| LockrunError::LaunchFailed {
                program: command.program().to_string(),
                source: e,
            })?;

        let pid = child.id();
        tracing::debug!(command = %command.display(), "Waiting for process {}", pid);

        let status = child
            .wait()
            .map_err(|e| LockrunError::Wait { pid, source: e })?;

        let outcome = ExitOutcome {
            pid,
            termination: Termination::from_status(status),
            elapsed: self.started.elapsed(),
        };

        tracing::debug!(
            "pid {} exited with {} (time={:.1?})",
            pid,
            outcome.termination,
            outcome.elapsed
        );
        if let Some(ceiling) = self.ceiling
            && outcome.elapsed > ceiling
        {
            tracing::debug!("pid {} ran past --maxtime of {:?}", pid, ceiling);
        }

        Ok(outcome)
    }
}
