// src/docs.rs

//! Documentation trigger
//!
//! Locates the Doxygen configuration at the repository root and runs the
//! generator there. The root is derived from the trigger's own location
//! (two directory levels up), never from the caller's working directory.

use crate::error::{Error, Result};
use crate::recipe::kitchen::{CommandRunner, Invocation};
use std::path::{Path, PathBuf};
use tracing::info;

/// Fixed name of the documentation configuration file
pub const DOC_CONFIG_FILE: &str = ".codedocs";

/// Location of the `run-doxygen` trigger source in this repository
///
/// Fixed when the crate is compiled, so the repository root (and its
/// `.codedocs`) is found no matter where the binaries are run from.
pub fn trigger_location() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tools")
        .join("run-doxygen.rs")
}

/// Derive the repository root from the trigger's location
///
/// `<root>/tools/run-doxygen.rs` resolves to `<root>`. Symlinks are
/// resolved first.
pub fn repository_root(location: &Path) -> Result<PathBuf> {
    let location = location.canonicalize().map_err(|e| {
        Error::NotFound(format!("Cannot resolve {}: {}", location.display(), e))
    })?;
    location
        .parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            Error::NotFound(format!(
                "{} has no directory two levels up",
                location.display()
            ))
        })
}

/// Runs the documentation generator against the repository's config
#[derive(Debug, Clone)]
pub struct DocTrigger {
    /// Generator program
    pub generator: PathBuf,
    /// Configuration file name at the repository root
    pub config_file: String,
}

impl Default for DocTrigger {
    fn default() -> Self {
        Self {
            generator: PathBuf::from("doxygen"),
            config_file: DOC_CONFIG_FILE.to_string(),
        }
    }
}

impl DocTrigger {
    /// Build the generator invocation for a trigger located at `location`
    pub fn invocation(&self, location: &Path) -> Result<Invocation> {
        let root = repository_root(location)?;
        let config = root.join(&self.config_file);
        if !config.is_file() {
            return Err(Error::NotFound(format!(
                "Documentation config not found: {}",
                config.display()
            )));
        }
        Ok(Invocation::new(&self.generator, &root).arg(config))
    }

    /// Generate documentation; a non-zero generator exit is an error
    pub fn generate(&self, runner: &dyn CommandRunner, location: &Path) -> Result<()> {
        let invocation = self.invocation(location)?;
        info!(
            "Generating documentation in {}",
            invocation.cwd.display()
        );
        runner.run(&invocation)
    }
}
