// src/recipe/kitchen/build.rs

//! Build Driver: configure and compile a source tree

use super::Kitchen;
use super::cmake::{CMake, UNIT_TEST_TARGET};
use super::config::absolute;
use super::options::BuildOptions;
use crate::error::Result;
use crate::recipe::format::Recipe;
use crate::settings::PlatformTriple;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A compiled tree, ready for installation or test execution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildResult {
    /// Source tree that was configured
    pub source_dir: PathBuf,
    /// Directory holding the build artifacts
    pub build_dir: PathBuf,
    /// Options and definitions the tree was configured with
    pub options: BuildOptions,
    /// Settings the tree was built for
    pub settings: PlatformTriple,
    /// Targets compiled, in order (`None` is the default target)
    pub targets: Vec<Option<String>>,
}

impl BuildResult {
    /// Whether the unit-test target was compiled
    pub fn built_unit_tests(&self) -> bool {
        self.targets
            .iter()
            .any(|t| t.as_deref() == Some(UNIT_TEST_TARGET))
    }
}

impl Kitchen {
    /// Configure and compile the package's source tree
    ///
    /// Any non-zero exit from the generator or compiler aborts immediately.
    pub fn build(
        &self,
        recipe: &Recipe,
        options: &BuildOptions,
        settings: &PlatformTriple,
    ) -> Result<BuildResult> {
        info!("Building {} for {}", recipe.reference(), settings);
        let layout = self.layout()?;
        self.build_tree(
            recipe,
            &layout.source_dir,
            &layout.build_dir,
            options,
            settings,
        )
    }

    pub(crate) fn build_tree(
        &self,
        recipe: &Recipe,
        source_dir: &Path,
        build_dir: &Path,
        options: &BuildOptions,
        settings: &PlatformTriple,
    ) -> Result<BuildResult> {
        let effective = options.resolve(recipe)?;
        if !effective.is_empty() {
            debug!("Effective options: {:?}", effective);
        }

        let layout = self.layout()?;
        let source_dir = absolute(source_dir)?;
        let build_dir = absolute(build_dir)?;

        fs::create_dir_all(&build_dir)?;
        let cmake = CMake::new(&layout, settings.build_type);

        info!("Configuring {}", source_dir.display());
        self.run(&cmake.configure(&source_dir, &build_dir, options))?;

        let mut targets = Vec::new();

        info!("Compiling");
        self.run(&cmake.build(&build_dir, None))?;
        targets.push(None);

        if options.unit_tests_enabled() {
            info!("Compiling unit-test target '{}'", UNIT_TEST_TARGET);
            self.run(&cmake.build(&build_dir, Some(UNIT_TEST_TARGET)))?;
            targets.push(Some(UNIT_TEST_TARGET.to_string()));
        }

        Ok(BuildResult {
            source_dir,
            build_dir,
            options: options.clone(),
            settings: settings.clone(),
            targets,
        })
    }
}
