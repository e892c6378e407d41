//! A minimal task runner for project scripts
//!
//! An embedding program builds a [`TaskTable`] mapping task names to shell commands, Rust
//! callables, or lists of both, then hands it to [`scripts`]. The first command line argument
//! picks the task; any further arguments are forwarded to every step it runs. A step that names
//! another task in the table is expanded in place.
//!
//! ```no_run
//! use std::process::ExitCode;
//!
//! use scrunkly::{EnvOverlay, TaskTable};
//!
//! fn main() -> ExitCode {
//!     let table = TaskTable::new()
//!         .task("build", "cargo build")
//!         .task("greet", "echo hello {0}")
//!         .task("ci", ["build", "cargo test"]);
//!     let table = match scrunkly::current_exe() {
//!         Ok(exe) => table.task("rebuild", format!("{} build", exe.display())),
//!         Err(_) => table,
//!     };
//!     let env = EnvOverlay::new().var("RUST_BACKTRACE", "1");
//!     match scrunkly::scripts_with_env(table, env) {
//!         Ok(_) => ExitCode::SUCCESS,
//!         Err(e) => {
//!             eprintln!("Error: {e}");
//!             ExitCode::FAILURE
//!         }
//!     }
//! }
//! ```

use std::path::PathBuf;

pub mod dispatch;
pub mod env;
pub mod invocation;
pub mod logger;
pub mod messages;
pub mod tasks;
pub mod template;

pub use dispatch::{DispatchError, Dispatcher, Outcome};
pub use env::EnvOverlay;
pub use invocation::Invocation;
pub use tasks::action::{Action, Callable, CallableError};
pub use tasks::definition::TaskDefinition;
pub use tasks::table::TaskTable;

/// Run the task named by the process arguments.
///
/// Prints the available tasks and returns [`Outcome::Usage`] when no task name was given.
///
/// # Errors
///
/// Returns `DispatchError` if the arguments cannot be parsed, the task is unknown, its
/// references loop, or any step fails.
pub fn scripts(table: TaskTable) -> Result<Outcome, DispatchError> {
    scripts_with_env(table, EnvOverlay::default())
}

/// Like [`scripts`], with `env` layered over the inherited environment of every shell command.
///
/// # Errors
///
/// See [`scripts`].
pub fn scripts_with_env(table: TaskTable, env: EnvOverlay) -> Result<Outcome, DispatchError> {
    let invocation = Invocation::from_env()?;
    Dispatcher::new(table).with_env(env).run(&invocation)
}

/// Path of the running program, for tasks that re-invoke it with another task name.
///
/// # Errors
///
/// Returns an `io::Error` if the platform cannot report the executable path.
pub fn current_exe() -> std::io::Result<PathBuf> {
    std::env::current_exe()?.canonicalize()
}
