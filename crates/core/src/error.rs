//! Error types for sk-core
//!
//! Only the fallible plumbing (config files, process invocation) returns these.
//! The version prober collapses them into fallback strings before they reach a caller.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Result type alias for sk-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for sk-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error, including failure to launch a companion binary
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Companion binary ran but exited unsuccessfully
    #[error("{} exited with {status}", .program.display())]
    CommandFailed { program: PathBuf, status: ExitStatus },
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::TomlParse(_) => 2, // UsageError
            _ => 1,                                      // GeneralError
        }
    }
}
