// src/recipe/parser.rs

//! Recipe file parsing

use crate::error::{Error, Result};
use crate::recipe::format::Recipe;
use std::path::Path;

/// Parse a recipe from a TOML string
pub fn parse_recipe(content: &str) -> Result<Recipe> {
    toml::from_str(content).map_err(|e| Error::ParseError(format!("Invalid recipe: {}", e)))
}

/// Parse a recipe from a file
pub fn parse_recipe_file(path: &Path) -> Result<Recipe> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::IoError(format!("Failed to read recipe file: {}", e)))?;

    parse_recipe(&content)
}

/// Validate a recipe for completeness and correctness
///
/// When `source_dir` is given, export globs are checked against it and
/// patterns that match nothing are reported as warnings.
pub fn validate_recipe(recipe: &Recipe, source_dir: Option<&Path>) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    if recipe.package.name.is_empty() {
        return Err(Error::ParseError("Recipe package name cannot be empty".to_string()));
    }
    recipe.semver()?;

    for (name, value) in &recipe.build.default_options {
        match recipe.build.options.get(name) {
            None => {
                return Err(Error::InvalidOption(format!(
                    "Default given for undeclared option '{}'",
                    name
                )));
            }
            Some(allowed) if !allowed.contains(value) => {
                return Err(Error::InvalidOption(format!(
                    "Default '{}' for option '{}' is not one of {:?}",
                    value, name, allowed
                )));
            }
            Some(_) => {}
        }
    }

    if recipe.package.description.is_none() {
        warnings.push("Missing package description".to_string());
    }
    if recipe.package.license.is_none() {
        warnings.push("Missing package license".to_string());
    }
    if recipe.package.author.is_none() {
        warnings.push("Missing package author".to_string());
    }

    if let Some(root) = source_dir {
        let patterns = recipe
            .sources
            .exports
            .iter()
            .chain(recipe.sources.exports_sources.iter());
        for pattern in patterns {
            if !pattern_matches(root, pattern)? {
                warnings.push(format!("Export pattern '{}' matches no files", pattern));
            }
        }
    }

    Ok(warnings)
}

fn pattern_matches(root: &Path, pattern: &str) -> Result<bool> {
    let full = root.join(pattern);
    let full = full.to_string_lossy();
    let mut paths = glob::glob(&full)
        .map_err(|e| Error::ParseError(format!("Invalid export pattern '{}': {}", pattern, e)))?;
    Ok(paths.any(|p| p.is_ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::format::Requirement;
    use std::fs;

    const RECIPE: &str = r#"
[package]
name = "Backport"
version = "0.1.0"
description = "Modern C++ backported to C++11"
author = "Someone <someone@example.com>"
license = "MIT"

[sources]
exports = ["LICENSE"]
exports_sources = ["include/*", "CMakeLists.txt", "LICENSE"]

[build]
requires = ["Catch2/2.7.1@catchorg/stable"]
"#;

    #[test]
    fn test_parse_valid_recipe() {
        let recipe = parse_recipe(RECIPE).unwrap();
        assert_eq!(recipe.package.name, "Backport");
        assert_eq!(recipe.build.generator, "cmake");
        assert_eq!(
            recipe.build.requires,
            vec!["Catch2/2.7.1@catchorg/stable".parse::<Requirement>().unwrap()]
        );
    }

    #[test]
    fn test_parse_invalid_recipe() {
        assert!(parse_recipe("this is not valid toml at all {}").is_err());
    }

    #[test]
    fn test_parse_bad_requirement() {
        let content = r#"
[package]
name = "Backport"
version = "0.1.0"

[build]
requires = ["Catch2"]
"#;
        assert!(parse_recipe(content).is_err());
    }

    #[test]
    fn test_builtin_recipe_matches_toml_shape() {
        let recipe = Recipe::backport();
        let text = toml::to_string(&recipe).unwrap();
        assert_eq!(parse_recipe(&text).unwrap(), recipe);
    }

    #[test]
    fn test_validate_empty_name() {
        let mut recipe = parse_recipe(RECIPE).unwrap();
        recipe.package.name.clear();
        assert!(validate_recipe(&recipe, None).is_err());
    }

    #[test]
    fn test_validate_non_semver_version() {
        let mut recipe = parse_recipe(RECIPE).unwrap();
        recipe.package.version = "latest".to_string();
        assert!(validate_recipe(&recipe, None).is_err());
    }

    #[test]
    fn test_validate_undeclared_default_option() {
        let mut recipe = parse_recipe(RECIPE).unwrap();
        recipe
            .build
            .default_options
            .insert("shared".to_string(), "True".to_string());
        assert!(matches!(
            validate_recipe(&recipe, None),
            Err(Error::InvalidOption(_))
        ));
    }

    #[test]
    fn test_validate_warnings() {
        let content = r#"
[package]
name = "Backport"
version = "0.1.0"
"#;
        let recipe = parse_recipe(content).unwrap();
        let warnings = validate_recipe(&recipe, None).unwrap();
        assert!(warnings.iter().any(|w| w.contains("description")));
        assert!(warnings.iter().any(|w| w.contains("license")));
        assert!(warnings.iter().any(|w| w.contains("author")));
    }

    #[test]
    fn test_validate_export_patterns() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("include/bpstd")).unwrap();
        fs::write(dir.path().join("LICENSE"), "MIT").unwrap();

        let recipe = parse_recipe(RECIPE).unwrap();
        let warnings = validate_recipe(&recipe, Some(dir.path())).unwrap();
        assert_eq!(
            warnings,
            vec!["Export pattern 'CMakeLists.txt' matches no files".to_string()]
        );
    }
}
