//! sk - sidekick command-line companion
//!
//! Reports on locally installed sidekick companion binaries.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sidekick_cli::commands::{self, Cli};

fn main() {
    let cli = Cli::parse();

    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // Logs go to stderr so status lines on stdout stay machine-readable.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let exit_code = commands::execute(cli);

    std::process::exit(exit_code.as_i32());
}
