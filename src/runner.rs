//! Run orchestration: preflight, acquire, supervise, release.
//!
//! The lock guard is owned here for the whole run. Every return after a
//! successful acquisition drops it, so the lock cannot outlive the run on any
//! error path.

use crate::config::Invocation;
use crate::error::{LockrunError, Result};
use crate::exit_codes;
use crate::locks::{LockBackend, PlatformLock};
use crate::policy::{self, Outcome};
use crate::supervisor::Supervisor;
use std::time::Instant;

/// Run the invocation with the platform's lock backend.
///
/// Returns the exit code lockrun should finish with.
pub fn run(invocation: &Invocation) -> Result<i32> {
    run_with(&PlatformLock::default(), invocation)
}

/// Run the invocation with an explicit lock backend.
pub fn run_with<B: LockBackend>(backend: &B, invocation: &Invocation) -> Result<i32> {
    let started = Instant::now();
    let lock_path = &invocation.lock_path;

    backend.preflight(lock_path)?;

    let outcome = policy::acquire(backend, lock_path, &invocation.policy);
    let mut guard = match outcome {
        Outcome::Acquired { guard, attempts } => {
            tracing::debug!(attempts, path = %guard.path().display(), "lock acquired");
            guard
        }
        _ if invocation.policy.quiet => {
            tracing::debug!(path = %lock_path.display(), "lock busy, skipping quietly");
            return Ok(exit_codes::SUCCESS);
        }
        Outcome::Failed => {
            return Err(LockrunError::Locked {
                command: invocation.command.program().to_string(),
                attempts: None,
            });
        }
        Outcome::GivenUp { attempts, reason } => {
            tracing::debug!(?reason, "gave up waiting for lock");
            return Err(LockrunError::Locked {
                command: invocation.command.program().to_string(),
                attempts: Some(attempts),
            });
        }
    };

    let supervisor = Supervisor::new(started, invocation.policy.max_wait_limit());
    let result = supervisor.run(&invocation.command);
    guard.release();

    let outcome = result?;
    tracing::debug!(pid = outcome.pid, code = outcome.exit_code(), "run finished");
    Ok(outcome.exit_code())
}
