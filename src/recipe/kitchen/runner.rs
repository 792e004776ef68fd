// src/recipe/kitchen/runner.rs

//! External process execution
//!
//! Every external step (configure, build, install, test binary, doc
//! generator) is expressed as an [`Invocation`] and handed to a
//! [`CommandRunner`]. Calls are blocking; there are no timeouts or retries.

use super::config::{absolute, is_bare_name};
use crate::error::{Error, Result};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tracing::debug;

/// A single external program call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program name (looked up on PATH) or path to an executable
    pub program: PathBuf,
    /// Arguments, in order
    pub args: Vec<OsString>,
    /// Working directory for the call
    pub cwd: PathBuf,
}

impl Invocation {
    /// Create an invocation with no arguments
    pub fn new(program: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    /// Short tool name used in error messages
    pub fn tool_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }

    /// The full command line, lossily rendered for logs
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// Executes invocations
///
/// Implementations must block until the program exits and report any
/// unsuccessful exit as [`Error::CommandFailed`].
pub trait CommandRunner {
    fn run(&self, invocation: &Invocation) -> Result<()>;
}

/// Runs invocations as real child processes, inheriting stdio
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        let program = resolve_program(&invocation.program)?;
        debug!(
            "Running in {}: {}",
            invocation.cwd.display(),
            invocation.command_line()
        );

        let status = Command::new(&program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .status()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => {
                    Error::ToolNotFound(format!("{}: {}", program.display(), e))
                }
                _ => Error::IoError(format!(
                    "Failed to run {}: {}",
                    invocation.tool_name(),
                    e
                )),
            })?;

        if !status.success() {
            return Err(Error::CommandFailed {
                tool: invocation.tool_name(),
                code: exit_code(status),
            });
        }

        Ok(())
    }
}

/// Look bare program names up on PATH; paths are anchored at the current directory
///
/// The child runs in its own working directory, so a relative program path
/// must be resolved before spawning.
fn resolve_program(program: &Path) -> Result<PathBuf> {
    if !is_bare_name(program) {
        return absolute(program);
    }
    which::which(program)
        .map_err(|_| Error::ToolNotFound(format!("{} not found in PATH", program.display())))
}

/// Exit code of a finished process; signals map to 128 + signal number
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
