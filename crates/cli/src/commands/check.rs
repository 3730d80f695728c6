//! check command - Probe installed companion binaries
//!
//! Each companion gets a spinner while it is queried, followed by its version
//! or a warning pointing at the path that was tried.

use std::io;

use sk_core::{VersionProber, DASHBOARD_BINARY, RUNTIME_BINARY};

use super::Context;
use crate::exit_code::ExitCode;
use crate::output::{Outcome, Palette, SharedSink, Spinner, StatusReporter};

/// Execute the check command
pub fn execute(context: &Context) -> ExitCode {
    let reporter = StatusReporter::new(context.output.clone());
    let palette = Palette::new(&context.output);
    let prober = VersionProber::new(&context.bin_dir);
    let mut missing = 0;

    for name in [RUNTIME_BINARY, DASHBOARD_BINARY] {
        let spinner = Spinner::start(
            &context.output,
            SharedSink::stdout(),
            format_args!("Probing {name}"),
        );

        match prober.probe_version(name) {
            Ok(version) => {
                spinner.finish(Outcome::Success);
                let version = palette.green(version.trim());
                reporter.info(&mut io::stdout(), format_args!("{name} {version}"));
            }
            Err(e) => {
                spinner.finish(Outcome::Failure);
                reporter.warning(
                    &mut io::stdout(),
                    format_args!(
                        "{name} is not usable at {}: {e}",
                        palette.yellow(prober.binary_path(name).display())
                    ),
                );
                missing += 1;
            }
        }
    }

    if missing > 0 {
        ExitCode::GeneralError
    } else {
        ExitCode::Success
    }
}
