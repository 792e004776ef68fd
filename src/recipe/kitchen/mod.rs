// src/recipe/kitchen/mod.rs

//! Kitchen: drives the external build system for a recipe
//!
//! The Kitchen owns the directory layout and the process runner, and exposes
//! the three procedural steps of a recipe:
//! - **Build**: configure and compile, optionally the unit-test target
//! - **Test**: build the consumer test package and run it when the target
//!   platform can execute it
//! - **Package**: rebuild with unit tests, install, copy the license and
//!   declare the package id

mod build;
mod cmake;
mod config;
mod options;
mod package;
pub mod runner;
mod test_gate;

pub use build::BuildResult;
pub use cmake::UNIT_TEST_TARGET;
pub use config::KitchenConfig;
pub use options::{BuildOptions, COMPILE_UNIT_TESTS};
pub use package::{PackageArtifact, PackageId, package_id};
pub use runner::{CommandRunner, Invocation, SystemRunner};
pub use test_gate::{GateDecision, TEST_PACKAGE_BINARY, TestOutcome, decide};

use std::sync::Arc;

/// The Kitchen: where recipes are built, tested and packaged
pub struct Kitchen {
    pub(crate) config: KitchenConfig,
    runner: Arc<dyn CommandRunner>,
}

impl Kitchen {
    /// Create a Kitchen that runs real processes
    pub fn new(config: KitchenConfig) -> Self {
        Self::with_runner(config, Arc::new(SystemRunner))
    }

    /// Create a Kitchen with a custom process runner
    pub fn with_runner(config: KitchenConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    /// Create a Kitchen with default configuration
    pub fn with_defaults() -> Self {
        Self::new(KitchenConfig::default())
    }

    /// The active configuration
    pub fn config(&self) -> &KitchenConfig {
        &self.config
    }

    /// The configuration with every directory made absolute
    pub(crate) fn layout(&self) -> crate::Result<KitchenConfig> {
        self.config.clone().into_absolute()
    }

    pub(crate) fn run(&self, invocation: &Invocation) -> crate::Result<()> {
        self.runner.run(invocation)
    }
}
