//! Configuration model for lockrun.
//!
//! Settings come from two places: an optional YAML defaults file
//! (`--config`) and the command line, which always wins. The merged result is
//! an immutable [`Invocation`] handed to the runner.

mod invocation;
mod model;
mod operations;
pub mod types;


// Re-export public API
pub use invocation::Invocation;
pub use model::Config;
pub use types::{CommandSpec, RetryPolicy};
