// src/commands/mod.rs
//! Command implementations
//!
//! Each command turns parsed CLI arguments into explicit library inputs
//! (recipe, settings, options, kitchen configuration) and reports results.

mod cook;
mod docs;
mod recipe;

pub use cook::{cmd_build, cmd_create, cmd_package, cmd_test};
pub use docs::cmd_docs;
pub use recipe::{cmd_info, cmd_package_id, cmd_validate};

use crate::cli::{KitchenArgs, OptionArgs, RecipeArgs, SettingsArgs};
use anyhow::{Context, Result};
use backport_recipe::recipe::{parse_recipe_file, validate_recipe};
use backport_recipe::{BuildOptions, KitchenConfig, PlatformTriple, Recipe};

/// Load the recipe named on the command line, or the built-in one
pub(crate) fn load_recipe(args: &RecipeArgs) -> Result<Recipe> {
    match &args.recipe {
        Some(path) => {
            let recipe = parse_recipe_file(path)
                .with_context(|| format!("Failed to parse recipe: {}", path.display()))?;
            for warning in validate_recipe(&recipe, None)
                .with_context(|| format!("Recipe validation failed: {}", path.display()))?
            {
                println!("Warning: {}", warning);
            }
            Ok(recipe)
        }
        None => Ok(Recipe::backport()),
    }
}

/// Host settings overlaid with whatever the user specified
pub(crate) fn resolve_settings(args: &SettingsArgs, host: &PlatformTriple) -> PlatformTriple {
    PlatformTriple {
        os: args.os.unwrap_or(host.os),
        compiler: args
            .compiler
            .clone()
            .unwrap_or_else(|| host.compiler.clone()),
        arch: args.arch.clone().unwrap_or_else(|| host.arch.clone()),
        build_type: args.build_type.unwrap_or(host.build_type),
    }
}

/// Kitchen layout from the command line, anchored at the current directory
pub(crate) fn kitchen_config(args: &KitchenArgs) -> Result<KitchenConfig> {
    let mut config = KitchenConfig::for_source(&args.source_dir);
    if let Some(dir) = &args.build_dir {
        config.build_dir = dir.clone();
    }
    if let Some(dir) = &args.package_dir {
        config.package_dir = dir.clone();
    }
    if let Some(dir) = &args.test_package_dir {
        config.test_package_dir = dir.clone();
    }
    if let Some(jobs) = args.jobs {
        config.jobs = jobs;
    }
    config.cmake = args.cmake.clone();
    config.generator = args.generator.clone();
    config
        .into_absolute()
        .context("Failed to resolve the build directories")
}

pub(crate) fn build_options(args: &OptionArgs) -> BuildOptions {
    let mut options = BuildOptions::with_unit_tests(args.unit_tests);
    for (key, value) in &args.defines {
        options = options.define(key, value);
    }
    for (key, value) in &args.options {
        options = options.option(key, value);
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use backport_recipe::{BuildType, Os};
    use std::path::PathBuf;

    #[test]
    fn test_resolve_settings_overlays_host() {
        let host = PlatformTriple::new(Os::Linux, "gcc", "x86_64", BuildType::Release);
        let args = SettingsArgs {
            os: Some(Os::Android),
            compiler: None,
            arch: Some("armv8".to_string()),
            build_type: None,
        };
        let settings = resolve_settings(&args, &host);
        assert_eq!(settings.os, Os::Android);
        assert_eq!(settings.compiler, "gcc");
        assert_eq!(settings.arch, "armv8");
        assert_eq!(settings.build_type, BuildType::Release);
    }

    #[test]
    fn test_kitchen_config_from_args() {
        let args = KitchenArgs {
            source_dir: PathBuf::from("/src"),
            build_dir: Some(PathBuf::from("/tmp/build")),
            package_dir: None,
            test_package_dir: None,
            cmake: PathBuf::from("/usr/bin/cmake"),
            generator: Some("Ninja".to_string()),
            jobs: Some(2),
        };
        let config = kitchen_config(&args).unwrap();
        assert_eq!(config.build_dir, PathBuf::from("/tmp/build"));
        assert_eq!(config.package_dir, PathBuf::from("/src/package"));
        assert_eq!(config.jobs, 2);
        assert_eq!(config.generator.as_deref(), Some("Ninja"));
    }

    #[test]
    fn test_kitchen_config_default_source_dir_is_absolute() {
        let args = KitchenArgs {
            source_dir: PathBuf::from("."),
            build_dir: Some(PathBuf::from("out")),
            package_dir: None,
            test_package_dir: None,
            cmake: PathBuf::from("cmake"),
            generator: None,
            jobs: None,
        };
        let cwd = std::env::current_dir().unwrap();
        let config = kitchen_config(&args).unwrap();
        assert_eq!(config.source_dir, cwd);
        assert_eq!(config.build_dir, cwd.join("out"));
        assert_eq!(config.package_dir, cwd.join("package"));
        assert_eq!(config.test_bin_dir(), cwd.join("out/test_package/bin"));
    }

    #[test]
    fn test_build_options_from_args() {
        let args = OptionArgs {
            unit_tests: false,
            defines: vec![("BACKPORT_COMPILE_UNIT_TESTS".to_string(), "ON".to_string())],
            options: Vec::new(),
        };
        // An explicit define wins over the flag's default
        assert!(build_options(&args).unit_tests_enabled());
    }
}
