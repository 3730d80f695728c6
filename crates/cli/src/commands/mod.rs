//! CLI command definitions and execution
//!
//! This module contains all CLI commands and their implementations.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sk_core::{default_bin_dir, Config, ConfigManager};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};

mod check;
mod completions;
mod version;

/// sk - sidekick command-line companion
///
/// Reports on the locally installed sidekick runtime and dashboard.
#[derive(Parser, Debug)]
#[command(name = "sk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Emit status lines as JSON objects
    #[arg(long, global = true, default_value = "false")]
    pub log_as_json: bool,

    /// Output command results as JSON
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Plain status lines without icons or animation
    #[arg(long, global = true, default_value = "false")]
    pub plain: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, default_value = "false")]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    /// Installation directory of companion binaries
    #[arg(long, global = true, value_name = "DIR")]
    pub bin_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print CLI and runtime versions
    Version(version::VersionArgs),

    /// Check that companion binaries are installed and answer
    Check,

    /// Generate shell completion scripts
    Completions(completions::CompletionsArgs),
}

/// Settings shared by every command
#[derive(Debug, Clone)]
pub struct Context {
    pub output: OutputConfig,
    pub bin_dir: PathBuf,
}

/// Execute the CLI command and return an exit code
pub fn execute(cli: Cli) -> ExitCode {
    let mut output = OutputConfig::for_console(cli.plain);
    output.json = cli.json;
    output.quiet = cli.quiet;

    // Completions must work even with a broken config file.
    let command = match cli.command {
        Commands::Completions(args) => return completions::execute(args),
        command => command,
    };

    let context = match load_context(cli.log_as_json, cli.bin_dir.as_deref(), output.clone()) {
        Ok(context) => context,
        Err(e) => {
            Formatter::new(output).error(&format!("{e:#}"));
            return failure_exit_code(&e);
        }
    };
    tracing::debug!(bin_dir = %context.bin_dir.display(), "resolved companion directory");

    match command {
        Commands::Version(args) => version::execute(args, &context),
        Commands::Check => check::execute(&context),
        Commands::Completions(args) => completions::execute(args),
    }
}

fn load_context(
    log_as_json: bool,
    bin_dir: Option<&Path>,
    mut output: OutputConfig,
) -> anyhow::Result<Context> {
    let config = load_config()?;

    if log_as_json || config.json_output() {
        output.enable_json_log();
    }

    let bin_dir = match bin_dir {
        Some(dir) => dir.to_path_buf(),
        None => default_bin_dir(config.defaults.bin_dir.as_deref())
            .context("Failed to locate companion binaries")?,
    };

    Ok(Context { output, bin_dir })
}

/// Exit code for a failure while preparing a command
///
/// Core errors carry their own code, even when wrapped in context.
fn failure_exit_code(err: &anyhow::Error) -> ExitCode {
    err.downcast_ref::<sk_core::Error>()
        .map(sk_core::Error::exit_code)
        .and_then(ExitCode::from_i32)
        .unwrap_or(ExitCode::GeneralError)
}

fn load_config() -> anyhow::Result<Config> {
    let manager = ConfigManager::new()?;
    manager
        .load()
        .with_context(|| format!("Failed to load {}", manager.config_path().display()))
}
