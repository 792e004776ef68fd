// src/commands/docs.rs

//! Docs command - run Doxygen for the repository

use anyhow::{Context, Result};
use backport_recipe::docs::{DocTrigger, trigger_location};
use backport_recipe::recipe::kitchen::SystemRunner;
use std::path::PathBuf;

/// Generate documentation with the given Doxygen executable
pub fn cmd_docs(doxygen: PathBuf) -> Result<()> {
    let trigger = DocTrigger {
        generator: doxygen,
        ..DocTrigger::default()
    };
    trigger
        .generate(&SystemRunner, &trigger_location())
        .context("Documentation generation failed")?;
    println!("[COMPLETE] Documentation generated");
    Ok(())
}
