// src/lib.rs

//! Backport packaging recipe
//!
//! Describes the header-only Backport (`bpstd`) C++ library as a package,
//! drives CMake to build, test and install it, and triggers Doxygen for its
//! documentation.
//!
//! # Architecture
//!
//! - Recipe: static package metadata, optionally loaded from TOML
//! - Kitchen: Build Driver, Test Gate and Packager over a process runner
//! - Pipeline: the lifecycle as an explicit, validated stage sequence
//! - Settings: platform values passed explicitly, never read from globals

pub mod docs;
mod error;
pub mod pipeline;
pub mod recipe;
pub mod settings;

pub use docs::{DocTrigger, repository_root};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, PipelineContext, PipelineReport, StageKind};
pub use recipe::{
    BuildOptions, BuildResult, Kitchen, KitchenConfig, PackageArtifact, PackageId, Recipe,
    TestOutcome,
};
pub use settings::{BuildType, Os, PlatformTriple};
