// tools/run-doxygen.rs

//! Generate the Doxygen documentation for the repository
//!
//! Takes no arguments. The repository root is two directory levels above
//! this file; `<root>/.codedocs` is handed to `doxygen` with the root as the
//! working directory. Doxygen's exit code becomes this program's exit code.

use backport_recipe::docs::{DocTrigger, trigger_location};
use backport_recipe::recipe::kitchen::SystemRunner;
use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match DocTrigger::default().generate(&SystemRunner, &trigger_location()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}
