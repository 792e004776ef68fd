// src/recipe/kitchen/test_gate.rs

//! Test Gate: run the consumer test package when the target can execute it

use super::Kitchen;
use super::build::BuildResult;
use super::options::BuildOptions;
use super::runner::Invocation;
use crate::error::{Error, Result};
use crate::recipe::format::Recipe;
use crate::settings::{Os, PlatformTriple};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Name of the binary produced by the test package
pub const TEST_PACKAGE_BINARY: &str = "test-package";

/// Result of the platform check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    Run,
    Skip,
}

/// Outcome of the test stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestOutcome {
    /// The binary ran and exited successfully
    Passed { binary: PathBuf },
    /// Execution was skipped; not a failure
    Skipped { os: Os, reason: String },
}

impl TestOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}

/// Decide whether a binary built for `target` may run on `host`
///
/// Only the OS family is compared; an architecture mismatch on the same OS
/// still runs.
pub fn decide(target: &PlatformTriple, host: &PlatformTriple) -> GateDecision {
    if target.os.is_runnable() && !target.is_cross(host) {
        if target.arch != host.arch {
            debug!(
                "Target arch {} differs from host arch {}, running anyway",
                target.arch, host.arch
            );
        }
        GateDecision::Run
    } else {
        GateDecision::Skip
    }
}

impl Kitchen {
    /// Compile the consumer test package against the given settings
    pub fn build_test_package(
        &self,
        recipe: &Recipe,
        settings: &PlatformTriple,
    ) -> Result<BuildResult> {
        let layout = self.layout()?;
        let source = &layout.test_package_dir;
        if !source.is_dir() {
            return Err(Error::NotFound(format!(
                "Test package directory not found: {}",
                source.display()
            )));
        }

        info!("Building test package for {}", recipe.reference());
        self.build_tree(
            recipe,
            source,
            &layout.test_build_dir(),
            &BuildOptions::new(),
            settings,
        )
    }

    /// Run the compiled test package if the target platform allows it
    ///
    /// A missing binary output directory is a configuration error and is
    /// reported before the platform check.
    pub fn run_test_package(
        &self,
        target: &PlatformTriple,
        host: &PlatformTriple,
    ) -> Result<TestOutcome> {
        let bin_dir = self.layout()?.test_bin_dir();
        if !bin_dir.is_dir() {
            return Err(Error::NotFound(format!(
                "Binary output directory not found: {}",
                bin_dir.display()
            )));
        }

        match decide(target, host) {
            GateDecision::Skip => {
                let reason = format!(
                    "Skipping unit test execution due to cross compiling for {}",
                    target.os
                );
                warn!("{}", reason);
                Ok(TestOutcome::Skipped {
                    os: target.os,
                    reason,
                })
            }
            GateDecision::Run => {
                let binary = bin_dir.join(format!(
                    "{}{}",
                    TEST_PACKAGE_BINARY,
                    std::env::consts::EXE_SUFFIX
                ));
                info!("Running {}", binary.display());
                self.run(&Invocation::new(&binary, &bin_dir))?;
                Ok(TestOutcome::Passed { binary })
            }
        }
    }
}
