// src/cli/mod.rs
//! CLI definitions for the Backport packaging recipe
//!
//! This module contains all command-line interface definitions using clap.
//! The actual command implementations are in the `commands` module.
//!
//! Lifecycle commands:
//! - `build` - Configure and compile the library
//! - `test` - Build the test package and run it if the platform allows
//! - `package` - Build, install and copy the license into the package layout
//! - `create` - Run the whole lifecycle
//!
//! Recipe commands:
//! - `info` / `validate` / `package-id`
//!
//! Documentation:
//! - `docs` - Run Doxygen against the repository's `.codedocs`

use backport_recipe::settings::{BuildType, Os};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "backport-recipe")]
#[command(author = "Backport Contributors")]
#[command(version)]
#[command(about = "Build, test and package the Backport header-only library", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Recipe selection
#[derive(Args, Debug, Clone)]
pub struct RecipeArgs {
    /// Recipe file (TOML); the built-in Backport recipe is used if omitted
    #[arg(long)]
    pub recipe: Option<PathBuf>,
}

/// Target platform settings; each defaults to the host's value
#[derive(Args, Debug, Clone)]
pub struct SettingsArgs {
    /// Target operating system (Windows, Linux, Macos, Android, ...)
    #[arg(long)]
    pub os: Option<Os>,

    /// Compiler identity (gcc, clang, apple-clang, msvc, ...)
    #[arg(long)]
    pub compiler: Option<String>,

    /// Target architecture (x86_64, x86, armv8, ...)
    #[arg(long)]
    pub arch: Option<String>,

    /// Build configuration
    #[arg(long)]
    pub build_type: Option<BuildType>,
}

/// Directory layout and build tool
#[derive(Args, Debug, Clone)]
pub struct KitchenArgs {
    /// Package source root (holds CMakeLists.txt and LICENSE)
    #[arg(long, default_value = ".")]
    pub source_dir: PathBuf,

    /// Build directory (default: <source>/build)
    #[arg(long)]
    pub build_dir: Option<PathBuf>,

    /// Package output directory (default: <source>/package)
    #[arg(long)]
    pub package_dir: Option<PathBuf>,

    /// Consumer test project (default: <source>/.conan/test_package)
    #[arg(long)]
    pub test_package_dir: Option<PathBuf>,

    /// CMake executable
    #[arg(long, env = "BACKPORT_CMAKE", default_value = "cmake")]
    pub cmake: PathBuf,

    /// CMake generator (e.g. Ninja)
    #[arg(short = 'G', long)]
    pub generator: Option<String>,

    /// Number of parallel build jobs (default: auto)
    #[arg(short, long)]
    pub jobs: Option<u32>,
}

/// Build options and definitions
#[derive(Args, Debug, Clone)]
pub struct OptionArgs {
    /// Compile the library's unit tests
    #[arg(long)]
    pub unit_tests: bool,

    /// Extra CMake definition, KEY=VALUE (repeatable)
    #[arg(short = 'D', long = "define", value_parser = parse_key_value)]
    pub defines: Vec<(String, String)>,

    /// Recipe option, KEY=VALUE (repeatable)
    #[arg(short = 'o', long = "option", value_parser = parse_key_value)]
    pub options: Vec<(String, String)>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the recipe's package metadata
    Info {
        #[command(flatten)]
        recipe: RecipeArgs,
    },

    /// Validate a recipe and check its export patterns
    Validate {
        #[command(flatten)]
        recipe: RecipeArgs,

        /// Source tree to check export patterns against
        #[arg(long)]
        source_dir: Option<PathBuf>,
    },

    /// Configure and compile the library
    Build {
        #[command(flatten)]
        recipe: RecipeArgs,
        #[command(flatten)]
        settings: SettingsArgs,
        #[command(flatten)]
        kitchen: KitchenArgs,
        #[command(flatten)]
        options: OptionArgs,
    },

    /// Build the test package and run it when the target platform allows
    Test {
        #[command(flatten)]
        recipe: RecipeArgs,
        #[command(flatten)]
        settings: SettingsArgs,
        #[command(flatten)]
        kitchen: KitchenArgs,
    },

    /// Build and install the package layout
    Package {
        #[command(flatten)]
        recipe: RecipeArgs,
        #[command(flatten)]
        settings: SettingsArgs,
        #[command(flatten)]
        kitchen: KitchenArgs,
        #[command(flatten)]
        options: OptionArgs,
    },

    /// Run the whole lifecycle: source, imports, build, test, package, package_id
    Create {
        #[command(flatten)]
        recipe: RecipeArgs,
        #[command(flatten)]
        settings: SettingsArgs,
        #[command(flatten)]
        kitchen: KitchenArgs,
        #[command(flatten)]
        options: OptionArgs,

        /// Skip the test stage
        #[arg(long)]
        skip_tests: bool,
    },

    /// Print the package's binary-compatibility id
    PackageId {
        #[command(flatten)]
        recipe: RecipeArgs,
        #[command(flatten)]
        settings: SettingsArgs,
    },

    /// Generate documentation with Doxygen
    Docs {
        /// Doxygen executable
        #[arg(long, env = "BACKPORT_DOXYGEN", default_value = "doxygen")]
        doxygen: PathBuf,
    },
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}
