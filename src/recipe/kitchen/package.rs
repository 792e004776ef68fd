// src/recipe/kitchen/package.rs

//! Packager: install a built tree into the final package layout

use super::Kitchen;
use super::build::BuildResult;
use super::cmake::CMake;
use super::config::absolute;
use crate::error::{Error, Result};
use crate::recipe::format::Recipe;
use crate::settings::PlatformTriple;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// License file copied into every package
const LICENSE_FILE: &str = "LICENSE";

/// Destination of the license inside the package
const LICENSES_DIR: &str = "licenses";

/// Binary-compatibility identity of a package
///
/// A header-only id carries no settings: one package instance serves every
/// consumer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageId {
    pub reference: String,
    pub header_only: bool,
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.header_only {
            write!(f, "{} (header-only)", self.reference)
        } else {
            f.write_str(&self.reference)
        }
    }
}

/// Compute the package id
///
/// Backport is header-only, so the id never depends on `settings`.
pub fn package_id(recipe: &Recipe, _settings: &PlatformTriple) -> PackageId {
    PackageId {
        reference: recipe.reference(),
        header_only: true,
    }
}

/// An installed package layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageArtifact {
    /// Package root directory
    pub root: PathBuf,
    /// Installed files, relative to `root`, sorted
    pub files: Vec<PathBuf>,
    /// No binary compatibility matters for consumers
    pub header_only: bool,
    /// Declared package id
    pub package_id: PackageId,
}

impl PackageArtifact {
    /// Check whether a relative path is part of the package
    pub fn contains(&self, relative: impl AsRef<Path>) -> bool {
        self.files.iter().any(|f| f == relative.as_ref())
    }
}

impl Kitchen {
    /// Produce the package layout from a build
    ///
    /// Always reconfigures with unit tests ON, rebuilds, builds the unit-test
    /// target, installs and copies the license. Work is staged next to the
    /// package directory and only moved into place once every step has
    /// succeeded, so a failure never leaves a partial package behind.
    pub fn package(&self, recipe: &Recipe, build: &BuildResult) -> Result<PackageArtifact> {
        info!("Packaging {}", recipe.reference());

        let layout = self.layout()?;
        let license = absolute(&build.source_dir)?.join(LICENSE_FILE);
        if !license.is_file() {
            return Err(Error::NotFound(format!(
                "License file not found: {}",
                license.display()
            )));
        }

        let mut options = build.options.clone();
        options.set_unit_tests(true);
        let rebuilt = self.build_tree(
            recipe,
            &build.source_dir,
            &build.build_dir,
            &options,
            &build.settings,
        )?;

        let package_dir = &layout.package_dir;
        let parent = parent_dir(package_dir)?;
        fs::create_dir_all(parent)?;
        let staging = tempfile::Builder::new()
            .prefix(".package-")
            .tempdir_in(parent)
            .map_err(|e| Error::IoError(format!("Failed to create staging directory: {}", e)))?;

        info!("Installing into staging area");
        let cmake = CMake::new(&layout, rebuilt.settings.build_type);
        self.run(&cmake.install(&rebuilt.build_dir, staging.path()))?;

        let licenses = staging.path().join(LICENSES_DIR);
        fs::create_dir_all(&licenses)?;
        fs::copy(&license, licenses.join(LICENSE_FILE)).map_err(|e| {
            Error::IoError(format!("Failed to copy {}: {}", license.display(), e))
        })?;

        let files = collect_files(staging.path())?;

        publish(staging.path(), package_dir)?;

        let id = package_id(recipe, &rebuilt.settings);
        info!(
            "Packaged {} ({} files) at {}",
            id,
            files.len(),
            package_dir.display()
        );

        Ok(PackageArtifact {
            root: package_dir.clone(),
            files,
            header_only: id.header_only,
            package_id: id,
        })
    }
}

fn parent_dir(path: &Path) -> Result<&Path> {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| Error::IoError(format!("{} has no parent directory", path.display())))
}

/// Move a staged layout to `target`, replacing any previous layout
///
/// The previous layout is moved aside first and only deleted once the new
/// one is in place; if the final move fails it is put back.
fn publish(staged: &Path, target: &Path) -> Result<()> {
    let previous = if target.exists() {
        debug!("Replacing existing package at {}", target.display());
        let aside = tempfile::Builder::new()
            .prefix(".package-old-")
            .tempdir_in(parent_dir(target)?)
            .map_err(|e| Error::IoError(format!("Failed to create backup directory: {}", e)))?;
        let old = aside.path().join("previous");
        fs::rename(target, &old).map_err(|e| {
            Error::IoError(format!("Failed to move aside {}: {}", target.display(), e))
        })?;
        Some((aside, old))
    } else {
        None
    };

    if let Err(e) = fs::rename(staged, target) {
        if let Some((_aside, old)) = &previous
            && let Err(restore) = fs::rename(old, target)
        {
            warn!(
                "Could not restore previous package at {}: {}",
                target.display(),
                restore
            );
        }
        return Err(Error::IoError(format!(
            "Failed to move package into {}: {}",
            target.display(),
            e
        )));
    }

    Ok(())
}

/// Regular files under `root`, relative and sorted
fn collect_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| Error::IoError(format!("Failed to list package: {}", e)))?;
        if entry.file_type().is_file() {
            let relative = entry
                .path()
                .strip_prefix(root)
                .map_err(|e| Error::IoError(e.to_string()))?;
            files.push(relative.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{BuildType, Os};

    #[test]
    fn test_package_id_ignores_settings() {
        let recipe = Recipe::backport();
        let linux = PlatformTriple::new(Os::Linux, "gcc", "x86_64", BuildType::Release);
        let windows = PlatformTriple::new(Os::Windows, "msvc", "x86", BuildType::Debug);
        let android = PlatformTriple::new(Os::Android, "clang", "armv8", BuildType::MinSizeRel);

        let id = package_id(&recipe, &linux);
        assert!(id.header_only);
        assert_eq!(id, package_id(&recipe, &windows));
        assert_eq!(id, package_id(&recipe, &android));
        assert_eq!(id.to_string(), "Backport/0.1.0 (header-only)");
    }

    fn leftovers(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .filter(|name| name.starts_with(".package-"))
            .collect()
    }

    #[test]
    fn test_publish_replaces_previous_layout() {
        let dir = tempfile::tempdir().unwrap();
        let staged = dir.path().join("staged");
        let target = dir.path().join("package");
        fs::create_dir_all(&staged).unwrap();
        fs::write(staged.join("new.txt"), "new").unwrap();
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("old.txt"), "old").unwrap();

        publish(&staged, &target).unwrap();
        assert!(target.join("new.txt").is_file());
        assert!(!target.join("old.txt").exists());
        assert!(!staged.exists());
        assert!(leftovers(dir.path()).is_empty());
    }

    #[test]
    fn test_failed_publish_restores_previous_layout() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("package");
        fs::create_dir_all(&target).unwrap();
        fs::write(target.join("old.txt"), "old").unwrap();

        // Nothing was staged, so the final move fails
        let err = publish(&dir.path().join("missing"), &target).unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
        assert_eq!(fs::read_to_string(target.join("old.txt")).unwrap(), "old");
        assert!(leftovers(dir.path()).is_empty());
    }

    #[test]
    fn test_collect_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("include/bpstd")).unwrap();
        fs::create_dir_all(dir.path().join("licenses")).unwrap();
        fs::write(dir.path().join("include/bpstd/span.hpp"), "").unwrap();
        fs::write(dir.path().join("licenses/LICENSE"), "").unwrap();

        let files = collect_files(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("include/bpstd/span.hpp"),
                PathBuf::from("licenses/LICENSE"),
            ]
        );
    }
}
