//! CLI argument parsing for lockrun.
//!
//! Uses clap derive macros for declarative argument definitions. Required
//! values (`--lockfile`, the command) are validated later by
//! [`Invocation::from_cli`](crate::config::Invocation::from_cli) so every
//! usage mistake exits with the same status.

use crate::exit_codes;
use clap::{CommandFactory, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

/// Run a command unless another instance already holds the lock.
///
/// The lock file is created if necessary (mode 0666) and no I/O of any kind
/// is done on it. It is never removed.
#[derive(Parser, Debug)]
#[command(name = "lockrun")]
#[command(author, about, long_about = None)]
#[command(override_usage = "lockrun [OPTIONS] -- <COMMAND> [ARGS]...")]
pub struct Cli {
    /// File used for locking.
    #[arg(short = 'L', long, value_name = "PATH")]
    pub lockfile: Option<PathBuf>,

    /// Loop until the lock is released instead of exiting with an error.
    #[arg(short = 'W', long, overrides_with = "no_wait")]
    pub wait: bool,

    /// Fail on contention even if the config file sets `wait`.
    #[arg(long, overrides_with = "wait")]
    pub no_wait: bool,

    /// Seconds to sleep between attempts with --wait [default: 10].
    #[arg(short = 'S', long, value_name = "SECONDS")]
    pub sleep: Option<u64>,

    /// Attempts per wait loop, 0 means retry forever [default: 0].
    #[arg(short = 'R', long, value_name = "COUNT")]
    pub retries: Option<u32>,

    /// Exit quietly (and with success) if locked.
    #[arg(short = 'Q', long, overrides_with = "no_quiet")]
    pub quiet: bool,

    /// Report contention even if the config file sets `quiet`.
    #[arg(long, overrides_with = "quiet")]
    pub no_quiet: bool,

    /// Show a bit more runtime debugging on stderr.
    #[arg(short = 'V', long, overrides_with = "no_verbose")]
    pub verbose: bool,

    /// Turn off `verbose` from the config file.
    #[arg(long, overrides_with = "verbose")]
    pub no_verbose: bool,

    /// Wait at most this many seconds for the lock, 0 means forever [default: 0].
    #[arg(long, value_name = "SECONDS")]
    pub maxtime: Option<u64>,

    /// YAML file with default settings; flags override it.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Command to run, after a literal `--`.
    #[arg(last = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

/// What to do with the process arguments.
#[derive(Debug)]
pub enum Parsed {
    /// Arguments parsed; go ahead.
    Run(Box<Cli>),
    /// Parsing ended (help, usage error); exit with this code.
    Exit(i32),
}

impl Cli {
    /// Parse the process arguments.
    pub fn parse_args() -> Parsed {
        Self::parse_from_args(std::env::args_os())
    }

    /// Parse an argument list, printing help or errors as a side effect.
    ///
    /// With no arguments at all the usage is printed and the run fails.
    pub fn parse_from_args<I, T>(args: I) -> Parsed
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

        if args.len() < 2 {
            let _ = Self::command().print_help();
            return Parsed::Exit(exit_codes::FAILURE);
        }

        match Self::try_parse_from(args) {
            Ok(cli) => Parsed::Run(Box::new(cli)),
            Err(err) => {
                let _ = err.print();
                if err.use_stderr() {
                    Parsed::Exit(exit_codes::FAILURE)
                } else {
                    Parsed::Exit(exit_codes::SUCCESS)
                }
            }
        }
    }
}
