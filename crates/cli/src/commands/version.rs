//! version command - Print CLI and runtime versions
//!
//! Versions of the companion binaries are discovered by running them, so a
//! missing runtime shows up as "n/a" rather than as an error.

use clap::Args;
use serde::Serialize;
use sk_core::{CliBuild, VersionProber};

use super::Context;
use crate::exit_code::ExitCode;
use crate::output::{Formatter, Palette};

/// Print CLI and runtime versions
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Print build details of the CLI and the runtime
    #[arg(long)]
    pub build_info: bool,
}

#[derive(Debug, Serialize)]
struct VersionOutput {
    cli_version: String,
    runtime_version: String,
    dashboard_version: String,
}

/// Build metadata of this binary
///
/// Git identifiers are injected through `SK_GIT_COMMIT` and `SK_GIT_VERSION`
/// at compile time and are empty when unset.
pub fn cli_build() -> CliBuild {
    CliBuild::new(
        env!("CARGO_PKG_VERSION"),
        option_env!("SK_GIT_COMMIT").unwrap_or_default(),
        option_env!("SK_GIT_VERSION").unwrap_or_default(),
    )
}

/// Execute the version command
pub fn execute(args: VersionArgs, context: &Context) -> ExitCode {
    let formatter = Formatter::new(context.output.clone());
    let prober = VersionProber::new(&context.bin_dir);
    let build = cli_build();

    if args.build_info {
        formatter.println(&prober.build_info(&build));
        return ExitCode::Success;
    }

    if formatter.is_json() {
        formatter.json(&VersionOutput {
            cli_version: build.version,
            runtime_version: prober.runtime_version().trim().to_string(),
            dashboard_version: prober.dashboard_version().trim().to_string(),
        });
    } else {
        let palette = Palette::new(&context.output);
        formatter.println(&format!("CLI version: {}", palette.white_bold(&build.version)));
        formatter.println(&format!(
            "Runtime version: {}",
            palette.white_bold(prober.runtime_version().trim())
        ));
    }

    ExitCode::Success
}
