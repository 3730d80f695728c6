//! Companion binary version discovery
//!
//! Shells out to installed companion binaries with `--version` or `--build-info`
//! and captures their standard output. Nothing here fails from the caller's
//! point of view: a missing or broken binary turns into a fallback string.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::{Error, Result};
use crate::paths::{binary_file_path, DASHBOARD_BINARY, RUNTIME_BINARY};

/// Returned by the version queries when a binary cannot be queried
pub const VERSION_UNAVAILABLE: &str = "n/a\n";

/// Flag passed to a companion binary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeFlag {
    /// `--version`
    Version,
    /// `--build-info`, only understood by newer runtimes
    BuildInfo,
}

impl ProbeFlag {
    /// Command-line form of the flag
    pub const fn as_arg(self) -> &'static str {
        match self {
            Self::Version => "--version",
            Self::BuildInfo => "--build-info",
        }
    }
}

/// Runs a companion binary and returns its standard output
///
/// Launch failures and non-zero exits are both errors.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner {
    fn run(&self, program: &Path, flag: ProbeFlag) -> Result<Vec<u8>>;
}

/// [`CommandRunner`] backed by `std::process::Command`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, flag: ProbeFlag) -> Result<Vec<u8>> {
        let output = Command::new(program).arg(flag.as_arg()).output()?;
        if !output.status.success() {
            return Err(Error::CommandFailed {
                program: program.to_path_buf(),
                status: output.status,
            });
        }
        Ok(output.stdout)
    }
}

/// Version and git identifiers of the CLI itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliBuild {
    pub version: String,
    pub git_commit: String,
    pub git_version: String,
}

impl CliBuild {
    pub fn new(
        version: impl Into<String>,
        git_commit: impl Into<String>,
        git_version: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            git_commit: git_commit.into(),
            git_version: git_version.into(),
        }
    }
}

/// Queries companion binaries installed in one directory
#[derive(Debug, Clone)]
pub struct VersionProber<R = SystemRunner> {
    bin_dir: PathBuf,
    runner: R,
}

impl VersionProber<SystemRunner> {
    /// Create a prober that runs real processes from `bin_dir`
    pub fn new(bin_dir: impl Into<PathBuf>) -> Self {
        Self::with_runner(bin_dir, SystemRunner)
    }
}

impl<R: CommandRunner> VersionProber<R> {
    /// Create a prober with a custom command runner
    pub fn with_runner(bin_dir: impl Into<PathBuf>, runner: R) -> Self {
        Self {
            bin_dir: bin_dir.into(),
            runner,
        }
    }

    /// Platform-specific path of a companion binary
    pub fn binary_path(&self, name: &str) -> PathBuf {
        binary_file_path(&self.bin_dir, name)
    }

    /// Run `<name> --version` and return its output, or the error that prevented it
    pub fn probe_version(&self, name: &str) -> Result<String> {
        let stdout = self.runner.run(&self.binary_path(name), ProbeFlag::Version)?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }

    /// Output of `sidekickd --version`, or `"n/a\n"`
    pub fn runtime_version(&self) -> String {
        self.version_or_fallback(RUNTIME_BINARY)
    }

    /// Output of `dashboard --version`, or `"n/a\n"`
    pub fn dashboard_version(&self) -> String {
        self.version_or_fallback(DASHBOARD_BINARY)
    }

    /// Multi-line build report for the CLI and the local runtime
    ///
    /// The runtime section comes from `--build-info`, retried with `--version`
    /// for runtimes predating that flag. Lines are joined with `\n` and the
    /// report carries no trailing newline.
    pub fn build_info(&self, cli: &CliBuild) -> String {
        let runtime = self.binary_path(RUNTIME_BINARY);

        let mut lines = vec![
            "CLI:".to_string(),
            format!("\tVersion: {}", cli.version),
            format!("\tGit Commit: {}", cli.git_commit),
            format!("\tGit Version: {}", cli.git_version),
            "Runtime:".to_string(),
        ];

        let output = self
            .runner
            .run(&runtime, ProbeFlag::BuildInfo)
            .or_else(|err| {
                debug!(
                    program = %runtime.display(),
                    error = %err,
                    "build info unavailable, falling back to --version"
                );
                self.runner.run(&runtime, ProbeFlag::Version)
            });

        match output {
            Ok(stdout) => {
                lines.extend(
                    String::from_utf8_lossy(&stdout)
                        .lines()
                        .map(|line| format!("\t{line}")),
                );
            }
            Err(err) => {
                debug!(program = %runtime.display(), error = %err, "runtime version unavailable");
                lines.push("\tN/A".to_string());
            }
        }

        lines.join("\n")
    }

    fn version_or_fallback(&self, name: &str) -> String {
        self.probe_version(name).unwrap_or_else(|err| {
            debug!(binary = name, error = %err, "version probe failed");
            VERSION_UNAVAILABLE.to_string()
        })
    }
}
