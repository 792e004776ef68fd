// src/recipe/mod.rs

//! Recipe system for packaging the Backport library
//!
//! A recipe is the static description of a package (identity, exported
//! files, build requirements, options). The [`Kitchen`] turns a recipe into
//! a built, tested and installed package by driving CMake.
//!
//! # Example Recipe
//!
//! ```toml
//! [package]
//! name = "Backport"
//! version = "0.1.0"
//! license = "MIT"
//!
//! [sources]
//! exports = ["LICENSE"]
//! exports_sources = ["cmake/*", "include/*", "test/*", "CMakeLists.txt", "LICENSE"]
//!
//! [build]
//! requires = ["Catch2/2.7.1@catchorg/stable"]
//! ```

mod format;
pub mod kitchen;
pub mod parser;

pub use format::{BuildSection, PackageSection, Recipe, Requirement, SourcesSection};
pub use kitchen::{
    BuildOptions, BuildResult, Kitchen, KitchenConfig, PackageArtifact, PackageId, TestOutcome,
};
pub use parser::{parse_recipe, parse_recipe_file, validate_recipe};
