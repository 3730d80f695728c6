//! Output formatting utilities
//!
//! This module provides the status reporter and spinner used for progress lines,
//! and the formatter used for command results. Status lines come in three
//! flavours: icon-prefixed (default), plain (limited consoles), or JSON.

mod formatter;
mod sink;
mod spinner;
mod status;
mod style;

pub use formatter::Formatter;
pub use sink::SharedSink;
pub use spinner::{Outcome, Spinner};
pub use status::{Status, StatusEvent, StatusReporter};
pub use style::Palette;

/// Output configuration derived from CLI flags and the config file
///
/// Threaded explicitly into every reporter instead of living in a global.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Use JSON for command results
    pub json: bool,
    /// Console cannot render icons or animation
    pub plain: bool,
    /// Suppress non-error command results (status lines are unaffected)
    pub quiet: bool,
    log_json: bool,
}

impl OutputConfig {
    /// Configuration for the current console
    ///
    /// Consoles on Windows are treated as limited. `force_plain` adds the same
    /// restriction anywhere.
    pub fn for_console(force_plain: bool) -> Self {
        Self {
            plain: force_plain || cfg!(windows),
            ..Default::default()
        }
    }

    /// Switch status lines to JSON
    ///
    /// Idempotent. There is no way back to human-readable lines.
    pub fn enable_json_log(&mut self) {
        self.log_json = true;
    }

    /// Check whether status lines are emitted as JSON
    pub fn is_json_log(&self) -> bool {
        self.log_json
    }

    /// Check whether icons and animation may be drawn
    pub fn decorated(&self) -> bool {
        !self.plain && !self.log_json
    }
}
