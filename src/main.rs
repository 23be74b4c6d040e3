//! lockrun: run a command under an exclusive file lock.
//!
//! Meant for cron jobs that must never overlap. Parses arguments, takes the
//! lock according to the wait/quiet policy, runs the command, and exits with
//! the command's status.

mod cli;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod locks;
mod logging;
pub mod policy;
pub mod runner;
pub mod supervisor;

use cli::{Cli, Parsed};
use config::Invocation;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = match Cli::parse_args() {
        Parsed::Run(cli) => *cli,
        Parsed::Exit(code) => return to_exit_code(code),
    };

    let result = Invocation::from_cli(cli).and_then(|invocation| {
        logging::init(invocation.verbose);
        runner::run(&invocation)
    });

    match result {
        Ok(code) => to_exit_code(code),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);
            to_exit_code(err.exit_code())
        }
    }
}

/// Convert an exit status to what the OS accepts, treating anything outside
/// 0..=255 as a plain failure.
fn to_exit_code(code: i32) -> ExitCode {
    match u8::try_from(code) {
        Ok(code) => ExitCode::from(code),
        Err(_) => ExitCode::from(exit_codes::FAILURE as u8),
    }
}
