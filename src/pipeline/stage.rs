// src/pipeline/stage.rs

//! Lifecycle stages and their ordering constraints

use std::fmt;

/// One step of the recipe lifecycle, in standard order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StageKind {
    /// Fetch sources (no-op: sources are exported with the recipe)
    Source,
    /// Copy files from dependencies (no-op for this package)
    Imports,
    /// Configure and compile
    Build,
    /// Build and run the consumer test package
    Test,
    /// Install into the package layout
    Package,
    /// Declare the binary-compatibility id
    PackageId,
}

impl StageKind {
    /// All stages in standard order
    pub fn all() -> &'static [StageKind] {
        &[
            Self::Source,
            Self::Imports,
            Self::Build,
            Self::Test,
            Self::Package,
            Self::PackageId,
        ]
    }

    /// Stages that must have run before this one
    pub fn requires(&self) -> &'static [StageKind] {
        match self {
            Self::Source | Self::Imports | Self::Build => &[],
            Self::Test | Self::Package => &[Self::Build],
            Self::PackageId => &[Self::Package],
        }
    }

    /// Whether the stage does nothing but mark its place in the lifecycle
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::Source | Self::Imports)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Imports => "imports",
            Self::Build => "build",
            Self::Test => "test",
            Self::Package => "package",
            Self::PackageId => "package_id",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
