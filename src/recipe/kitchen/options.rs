// src/recipe/kitchen/options.rs

//! Build options and generator definitions

use crate::error::{Error, Result};
use crate::recipe::format::Recipe;
use std::collections::BTreeMap;

/// Definition enabling compilation of the library's unit tests
pub const COMPILE_UNIT_TESTS: &str = "BACKPORT_COMPILE_UNIT_TESTS";

/// Options and definitions for one build
///
/// `options` are recipe-level knobs and must be declared by the recipe.
/// `definitions` are passed straight through to the generator as `-DKEY=VALUE`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub options: BTreeMap<String, String>,
    pub definitions: BTreeMap<String, String>,
}

impl BuildOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with the unit-test definition set
    pub fn with_unit_tests(enabled: bool) -> Self {
        let mut options = Self::new();
        options.set_unit_tests(enabled);
        options
    }

    /// Set or override the unit-test definition
    pub fn set_unit_tests(&mut self, enabled: bool) {
        let value = if enabled { "ON" } else { "OFF" };
        self.definitions
            .insert(COMPILE_UNIT_TESTS.to_string(), value.to_string());
    }

    /// Whether the unit-test target should be built
    pub fn unit_tests_enabled(&self) -> bool {
        self.definitions
            .get(COMPILE_UNIT_TESTS)
            .is_some_and(|v| is_cmake_true(v))
    }

    /// Add a generator definition
    pub fn define(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.definitions.insert(key.into(), value.into());
        self
    }

    /// Set a recipe option
    pub fn option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Check options against what the recipe declares
    ///
    /// Returns the effective options: recipe defaults overlaid with the
    /// caller's values.
    pub fn resolve(&self, recipe: &Recipe) -> Result<BTreeMap<String, String>> {
        let mut effective = recipe.build.default_options.clone();

        for (name, value) in &self.options {
            let allowed = recipe.build.options.get(name).ok_or_else(|| {
                Error::InvalidOption(format!(
                    "{} does not recognize option '{}'",
                    recipe.package.name, name
                ))
            })?;
            if !allowed.is_empty() && !allowed.contains(value) {
                return Err(Error::InvalidOption(format!(
                    "Value '{}' for option '{}' is not one of {:?}",
                    value, name, allowed
                )));
            }
            effective.insert(name.clone(), value.clone());
        }

        Ok(effective)
    }

    /// Definitions rendered as `-DKEY=VALUE` arguments
    pub fn definition_args(&self) -> Vec<String> {
        self.definitions
            .iter()
            .map(|(k, v)| format!("-D{}={}", k, v))
            .collect()
    }
}

/// CMake's notion of a true constant
fn is_cmake_true(value: &str) -> bool {
    matches!(
        value.to_ascii_uppercase().as_str(),
        "ON" | "1" | "TRUE" | "YES" | "Y"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_tests_flag() {
        assert!(!BuildOptions::new().unit_tests_enabled());
        assert!(BuildOptions::with_unit_tests(true).unit_tests_enabled());
        assert!(!BuildOptions::with_unit_tests(false).unit_tests_enabled());
        assert!(
            BuildOptions::new()
                .define(COMPILE_UNIT_TESTS, "true")
                .unit_tests_enabled()
        );
    }

    #[test]
    fn test_set_unit_tests_overrides() {
        let mut options = BuildOptions::with_unit_tests(false);
        options.set_unit_tests(true);
        assert_eq!(
            options.definitions.get(COMPILE_UNIT_TESTS).map(String::as_str),
            Some("ON")
        );
    }

    #[test]
    fn test_definition_args() {
        let options = BuildOptions::with_unit_tests(true).define("CMAKE_VERBOSE_MAKEFILE", "ON");
        assert_eq!(
            options.definition_args(),
            vec![
                "-DBACKPORT_COMPILE_UNIT_TESTS=ON".to_string(),
                "-DCMAKE_VERBOSE_MAKEFILE=ON".to_string(),
            ]
        );
    }

    #[test]
    fn test_backport_rejects_any_option() {
        let recipe = Recipe::backport();
        assert!(BuildOptions::new().resolve(&recipe).unwrap().is_empty());
        let err = BuildOptions::new()
            .option("shared", "True")
            .resolve(&recipe)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOption(_)));
    }

    #[test]
    fn test_declared_option_values() {
        let mut recipe = Recipe::backport();
        recipe.build.options.insert(
            "cxx_standard".to_string(),
            vec!["11".to_string(), "14".to_string()],
        );
        recipe
            .build
            .default_options
            .insert("cxx_standard".to_string(), "11".to_string());

        let effective = BuildOptions::new().resolve(&recipe).unwrap();
        assert_eq!(effective.get("cxx_standard").map(String::as_str), Some("11"));

        let effective = BuildOptions::new()
            .option("cxx_standard", "14")
            .resolve(&recipe)
            .unwrap();
        assert_eq!(effective.get("cxx_standard").map(String::as_str), Some("14"));

        assert!(
            BuildOptions::new()
                .option("cxx_standard", "20")
                .resolve(&recipe)
                .is_err()
        );
    }
}
