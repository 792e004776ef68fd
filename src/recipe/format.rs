// src/recipe/format.rs

//! Recipe file format definitions
//!
//! A recipe is the static description of a package: who it is, which files
//! travel with it, what it needs at build time and which options it accepts.
//! Recipes are usually the built-in [`Recipe::backport`], but the same
//! structure round-trips through TOML for alternative package definitions.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// A complete package recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Package metadata
    pub package: PackageSection,

    /// Files exported alongside the recipe
    #[serde(default)]
    pub sources: SourcesSection,

    /// Build requirements and options
    #[serde(default)]
    pub build: BuildSection,
}

impl Recipe {
    /// The Backport package definition
    pub fn backport() -> Self {
        Self {
            package: PackageSection {
                name: "Backport".to_string(),
                version: "0.1.0".to_string(),
                description: Some("Modern C++ backported to C++11".to_string()),
                url: Some("https://github.com/bitwizeshift/bpstd".to_string()),
                author: Some("Matthew Rodusek <matthew.rodusek@gmail.com>".to_string()),
                license: Some("MIT".to_string()),
            },
            sources: SourcesSection {
                exports: vec!["LICENSE".to_string()],
                exports_sources: vec![
                    "cmake/*".to_string(),
                    "include/*".to_string(),
                    "test/*".to_string(),
                    "CMakeLists.txt".to_string(),
                    "LICENSE".to_string(),
                ],
            },
            build: BuildSection {
                generator: default_generator(),
                requires: vec![Requirement {
                    name: "Catch2".to_string(),
                    version: "2.7.1".to_string(),
                    user: Some("catchorg".to_string()),
                    channel: Some("stable".to_string()),
                }],
                options: BTreeMap::new(),
                default_options: BTreeMap::new(),
            },
        }
    }

    /// `name/version` reference for this package
    pub fn reference(&self) -> String {
        format!("{}/{}", self.package.name, self.package.version)
    }

    /// Parse the package version as a semantic version
    pub fn semver(&self) -> Result<semver::Version> {
        semver::Version::parse(&self.package.version).map_err(|e| {
            Error::ParseError(format!(
                "Invalid package version '{}': {}",
                self.package.version, e
            ))
        })
    }

    /// Check whether the recipe declares an option
    pub fn has_option(&self, name: &str) -> bool {
        self.build.options.contains_key(name)
    }
}

/// Package identity section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageSection {
    /// Package name
    pub name: String,

    /// Package version (semantic)
    pub version: String,

    /// Short description
    #[serde(default)]
    pub description: Option<String>,

    /// Upstream source URL
    #[serde(default)]
    pub url: Option<String>,

    /// Author, usually `Name <email>`
    #[serde(default)]
    pub author: Option<String>,

    /// License identifier (SPDX)
    #[serde(default)]
    pub license: Option<String>,
}

/// Exported files
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourcesSection {
    /// Globs exported next to the recipe itself
    #[serde(default)]
    pub exports: Vec<String>,

    /// Globs exported as the package's source tree
    #[serde(default)]
    pub exports_sources: Vec<String>,
}

/// Build requirements and options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSection {
    /// Build-system generator the recipe targets
    #[serde(default = "default_generator")]
    pub generator: String,

    /// Build-time requirements
    ///
    /// Format: `["Catch2/2.7.1@catchorg/stable"]`
    #[serde(default)]
    pub requires: Vec<Requirement>,

    /// Recognized options and their allowed values
    #[serde(default)]
    pub options: BTreeMap<String, Vec<String>>,

    /// Default values for recognized options
    #[serde(default)]
    pub default_options: BTreeMap<String, String>,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            generator: default_generator(),
            requires: Vec::new(),
            options: BTreeMap::new(),
            default_options: BTreeMap::new(),
        }
    }
}

fn default_generator() -> String {
    "cmake".to_string()
}

/// A build-time requirement: `name/version[@user/channel]`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Requirement {
    pub name: String,
    pub version: String,
    pub user: Option<String>,
    pub channel: Option<String>,
}

impl FromStr for Requirement {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (reference, namespace) = match s.split_once('@') {
            Some((reference, namespace)) => (reference, Some(namespace)),
            None => (s, None),
        };

        let (name, version) = reference.split_once('/').ok_or_else(|| {
            Error::ParseError(format!("Requirement '{}' is missing a version", s))
        })?;
        if name.is_empty() || version.is_empty() || version.contains('/') {
            return Err(Error::ParseError(format!("Malformed requirement '{}'", s)));
        }

        let (user, channel) = match namespace {
            None => (None, None),
            Some(ns) => match ns.split_once('/') {
                Some((user, channel))
                    if !user.is_empty() && !channel.is_empty() && !channel.contains('/') =>
                {
                    (Some(user.to_string()), Some(channel.to_string()))
                }
                _ => {
                    return Err(Error::ParseError(format!(
                        "Requirement '{}' must use @user/channel",
                        s
                    )));
                }
            },
        };

        Ok(Self {
            name: name.to_string(),
            version: version.to_string(),
            user,
            channel,
        })
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)?;
        if let (Some(user), Some(channel)) = (&self.user, &self.channel) {
            write!(f, "@{}/{}", user, channel)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Requirement {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Requirement> for String {
    fn from(req: Requirement) -> Self {
        req.to_string()
    }
}
