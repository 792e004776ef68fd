// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use backport_recipe::recipe::kitchen::{CommandRunner, Invocation};
use backport_recipe::{BuildType, Error, KitchenConfig, Os, PlatformTriple, Result};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

type Behavior = Box<dyn Fn(&Invocation) -> Result<()>>;

/// A runner that records invocations instead of spawning processes.
///
/// The behavior closure decides whether each call succeeds and may write
/// files to simulate what the real tool would produce.
pub struct RecordingRunner {
    calls: Mutex<Vec<Invocation>>,
    behavior: Behavior,
}

impl RecordingRunner {
    /// Every invocation succeeds.
    pub fn new() -> Self {
        Self::with_behavior(|_| Ok(()))
    }

    pub fn with_behavior(behavior: impl Fn(&Invocation) -> Result<()> + 'static) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            behavior: Box::new(behavior),
        }
    }

    /// Fail the first time a command line contains `needle`.
    pub fn failing_on(needle: &'static str, code: i32) -> Self {
        Self::with_behavior(move |inv| {
            if inv.command_line().contains(needle) {
                Err(Error::CommandFailed {
                    tool: inv.tool_name(),
                    code,
                })
            } else {
                Ok(())
            }
        })
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(Invocation::command_line).collect()
    }

    /// Whether any recorded command line contains `needle`.
    pub fn ran(&self, needle: &str) -> bool {
        self.command_lines().iter().any(|c| c.contains(needle))
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        self.calls.lock().unwrap().push(invocation.clone());
        (self.behavior)(invocation)
    }
}

/// Create a Backport-like source tree.
///
/// Returns (TempDir, KitchenConfig) - keep the TempDir alive to prevent cleanup.
pub fn source_tree() -> (TempDir, KitchenConfig) {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::create_dir_all(root.join("include/bpstd")).unwrap();
    fs::create_dir_all(root.join("cmake")).unwrap();
    fs::create_dir_all(root.join("test/src/bpstd")).unwrap();
    fs::create_dir_all(root.join(".conan/test_package")).unwrap();
    fs::write(root.join("CMakeLists.txt"), "project(Backport CXX)\n").unwrap();
    fs::write(root.join("LICENSE"), "MIT License\n").unwrap();
    fs::write(root.join("include/bpstd/span.hpp"), "#pragma once\n").unwrap();
    fs::write(
        root.join(".conan/test_package/CMakeLists.txt"),
        "project(test-package CXX)\n",
    )
    .unwrap();

    let config = KitchenConfig {
        jobs: 2,
        ..KitchenConfig::for_source(root)
    };
    (dir, config)
}

/// Create the test package's binary output directory.
pub fn create_test_bin_dir(config: &KitchenConfig) {
    fs::create_dir_all(config.test_bin_dir()).unwrap();
}

/// Simulate `cmake --install` by writing a header into the prefix.
pub fn install_headers(inv: &Invocation) -> Result<()> {
    if inv.args.first().is_some_and(|a| a == "--install") {
        let prefix = inv
            .args
            .iter()
            .skip_while(|a| *a != "--prefix")
            .nth(1)
            .expect("install without --prefix");
        let include = Path::new(prefix).join("include/bpstd");
        fs::create_dir_all(&include)?;
        fs::write(include.join("span.hpp"), "#pragma once\n")?;
    }
    Ok(())
}

/// Write an executable shell script
#[cfg(unix)]
pub fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, body).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}

pub fn linux() -> PlatformTriple {
    PlatformTriple::new(Os::Linux, "gcc", "x86_64", BuildType::Release)
}

pub fn android() -> PlatformTriple {
    PlatformTriple::new(Os::Android, "clang", "armv8", BuildType::Release)
}
