//! Example project script: `cargo run --example tasks -- <task> [args...]`

use std::process::ExitCode;

use log::{error, info};
use scrunkly::{Action, EnvOverlay, TaskTable};

fn main() -> ExitCode {
    if let Err(e) = scrunkly::logger::init(None) {
        eprintln!("Error: {e}");
    }

    let table = TaskTable::new()
        .task("fmt", "cargo fmt --all")
        .task("lint", "cargo clippy --all-targets")
        .task("test", "cargo test")
        .task("greet", "echo hello {0}")
        .task(
            "hello",
            Action::call("hello", |args| {
                info!("Greeting {} people", args.len());
                println!("Hello {}", args.join(" "));
                Ok(())
            }),
        )
        .task("check", ["fmt", "lint", "test"])
        .task("env", "echo profile=$SCRUNKLY_PROFILE");

    let env = EnvOverlay::new().var("SCRUNKLY_PROFILE", "demo");
    match scrunkly::scripts_with_env(table, env) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Task failed: {e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
