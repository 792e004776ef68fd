// src/error.rs

//! Error types shared by the recipe, kitchen, pipeline and doc trigger

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while loading a recipe or running its stages
///
/// Every variant is fatal for the pipeline that raised it. Skipping the
/// test package on a non-runnable platform is not an error and never
/// surfaces here.
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem failure while staging or copying files
    #[error("I/O error: {0}")]
    IoError(String),

    /// Malformed recipe, setting or requirement
    #[error("Parse error: {0}")]
    ParseError(String),

    /// An expected file or directory is missing
    #[error("Not found: {0}")]
    NotFound(String),

    /// An external program could not be located
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// An external program exited unsuccessfully
    #[error("{tool} failed with exit code {code}")]
    CommandFailed { tool: String, code: i32 },

    /// A build option the recipe does not recognize
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// Stage ordering or precondition violated
    #[error("Pipeline error: {0}")]
    PipelineError(String),
}

impl Error {
    /// Process exit code for this error
    ///
    /// External tool failures keep the tool's own code; everything else
    /// maps to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CommandFailed { code, .. } if *code != 0 => *code,
            _ => 1,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e.to_string())
    }
}
