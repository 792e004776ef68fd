// src/commands/recipe.rs

//! Recipe commands - info, validate, package-id

use super::{load_recipe, resolve_settings};
use crate::cli::{RecipeArgs, SettingsArgs};
use anyhow::{Context, Result};
use backport_recipe::recipe::{parse_recipe_file, validate_recipe};
use backport_recipe::recipe::kitchen::package_id;
use backport_recipe::{PlatformTriple, Recipe};
use std::path::Path;

/// Show the recipe's package metadata
pub fn cmd_info(recipe: &RecipeArgs) -> Result<()> {
    let recipe = load_recipe(recipe)?;
    let pkg = &recipe.package;

    println!("Package: {}", pkg.name);
    println!("Version: {}", pkg.version);
    if let Some(description) = &pkg.description {
        println!("Description: {}", description);
    }
    if let Some(url) = &pkg.url {
        println!("URL: {}", url);
    }
    if let Some(author) = &pkg.author {
        println!("Author: {}", author);
    }
    if let Some(license) = &pkg.license {
        println!("License: {}", license);
    }
    println!("Generator: {}", recipe.build.generator);

    if !recipe.sources.exports.is_empty() {
        println!("Exports: {}", recipe.sources.exports.join(", "));
    }
    if !recipe.sources.exports_sources.is_empty() {
        println!("Exported sources: {}", recipe.sources.exports_sources.join(", "));
    }
    if !recipe.build.requires.is_empty() {
        println!("Build requires:");
        for req in &recipe.build.requires {
            println!("  - {}", req);
        }
    }
    if recipe.build.options.is_empty() {
        println!("Options: (none)");
    } else {
        println!("Options:");
        for (name, values) in &recipe.build.options {
            println!("  - {}: {}", name, values.join(" | "));
        }
    }

    Ok(())
}

/// Validate a recipe and, optionally, its exports against a source tree
pub fn cmd_validate(recipe: &RecipeArgs, source_dir: Option<&Path>) -> Result<()> {
    let recipe = match &recipe.recipe {
        Some(path) => parse_recipe_file(path)
            .with_context(|| format!("Failed to parse recipe: {}", path.display()))?,
        None => Recipe::backport(),
    };

    let warnings = validate_recipe(&recipe, source_dir).context("Recipe validation failed")?;
    for warning in &warnings {
        println!("Warning: {}", warning);
    }

    println!("Recipe validation passed");
    if warnings.is_empty() {
        println!("[OK] No issues found");
    } else {
        println!("[OK] {} warning(s)", warnings.len());
    }
    Ok(())
}

/// Print the package's binary-compatibility id
pub fn cmd_package_id(recipe: &RecipeArgs, settings: &SettingsArgs) -> Result<()> {
    let recipe = load_recipe(recipe)?;
    let settings = resolve_settings(settings, &PlatformTriple::host());
    println!("{}", package_id(&recipe, &settings));
    Ok(())
}
