// src/recipe/kitchen/config.rs

//! Configuration types for the Kitchen build system

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Configuration for the Kitchen
#[derive(Debug, Clone)]
pub struct KitchenConfig {
    /// Root of the package's source tree (holds CMakeLists.txt and LICENSE)
    pub source_dir: PathBuf,
    /// Directory the package is configured and compiled in
    pub build_dir: PathBuf,
    /// Directory the finished package layout is installed to
    pub package_dir: PathBuf,
    /// Consumer project used to validate the package
    pub test_package_dir: PathBuf,
    /// Build-system generator program
    pub cmake: PathBuf,
    /// CMake generator name passed as `-G` (None = CMake's default)
    pub generator: Option<String>,
    /// Number of parallel jobs
    pub jobs: u32,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        let jobs = std::thread::available_parallelism()
            .map(|p| p.get() as u32)
            .unwrap_or(4);

        Self {
            source_dir: PathBuf::from("."),
            build_dir: PathBuf::from("build"),
            package_dir: PathBuf::from("package"),
            test_package_dir: PathBuf::from(".conan/test_package"),
            cmake: PathBuf::from("cmake"),
            generator: None,
            jobs,
        }
    }
}

impl KitchenConfig {
    /// Create a configuration rooted at a source tree
    ///
    /// Build, package and test-package directories are placed relative to
    /// the source root using the default layout.
    pub fn for_source(source_dir: &Path) -> Self {
        Self {
            source_dir: source_dir.to_path_buf(),
            build_dir: source_dir.join("build"),
            package_dir: source_dir.join("package"),
            test_package_dir: source_dir.join(".conan").join("test_package"),
            ..Self::default()
        }
    }

    /// Where the test package is compiled
    pub fn test_build_dir(&self) -> PathBuf {
        self.build_dir.join("test_package")
    }

    /// Directory the test package's binary is written to
    pub fn test_bin_dir(&self) -> PathBuf {
        self.test_build_dir().join("bin")
    }

    /// Anchor every directory (and a path-like cmake) at the current directory
    ///
    /// External tools run with their own working directory, so relative
    /// paths handed to them would resolve against the wrong place.
    pub fn into_absolute(self) -> Result<Self> {
        let cmake = if is_bare_name(&self.cmake) {
            self.cmake
        } else {
            absolute(&self.cmake)?
        };
        Ok(Self {
            source_dir: absolute(&self.source_dir)?,
            build_dir: absolute(&self.build_dir)?,
            package_dir: absolute(&self.package_dir)?,
            test_package_dir: absolute(&self.test_package_dir)?,
            cmake,
            ..self
        })
    }
}

/// A program name to be looked up on PATH rather than a path
pub(crate) fn is_bare_name(program: &Path) -> bool {
    !program.is_absolute() && program.components().count() == 1
}

/// `path` made absolute against the current directory, without touching the filesystem
pub(crate) fn absolute(path: &Path) -> Result<PathBuf> {
    std::path::absolute(path)
        .map_err(|e| Error::IoError(format!("Cannot resolve {}: {}", path.display(), e)))
}
