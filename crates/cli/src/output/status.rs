//! Single-line status events
//!
//! Every call writes exactly one line to the given sink. Write errors are
//! swallowed: reporting progress must never be the reason a command fails.

use std::fmt::Display;
use std::io::Write;

use jiff::Timestamp;
use serde::Serialize;

use super::OutputConfig;

/// Severity of a status event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
    Warning,
    Pending,
    Info,
}

impl Status {
    /// Icon printed in front of human-readable lines
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Failure => "❌",
            Self::Warning => "⚠",
            Self::Pending => "⌛",
            Self::Info => "ℹ️",
        }
    }

    /// Tag used in JSON lines
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Warning => "warning",
            Self::Pending => "pending",
            Self::Info => "info",
        }
    }
}

/// JSON form of a status line
#[derive(Debug, Serialize)]
pub struct StatusEvent<'a> {
    pub time: Timestamp,
    pub status: &'static str,
    pub msg: &'a str,
}

/// Writes status lines according to an [`OutputConfig`]
#[derive(Debug, Clone, Default)]
pub struct StatusReporter {
    config: OutputConfig,
}

impl StatusReporter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Write one status line for `message`
    ///
    /// `message` is usually `format_args!(...)`.
    pub fn emit<W: Write + ?Sized>(&self, w: &mut W, status: Status, message: impl Display) {
        let line = self.render(status, &message.to_string());
        if let Err(err) = w.write_all(line.as_bytes()).and_then(|()| w.flush()) {
            tracing::trace!(error = %err, "status line dropped");
        }
    }

    pub fn success<W: Write + ?Sized>(&self, w: &mut W, message: impl Display) {
        self.emit(w, Status::Success, message);
    }

    pub fn failure<W: Write + ?Sized>(&self, w: &mut W, message: impl Display) {
        self.emit(w, Status::Failure, message);
    }

    pub fn warning<W: Write + ?Sized>(&self, w: &mut W, message: impl Display) {
        self.emit(w, Status::Warning, message);
    }

    pub fn pending<W: Write + ?Sized>(&self, w: &mut W, message: impl Display) {
        self.emit(w, Status::Pending, message);
    }

    pub fn info<W: Write + ?Sized>(&self, w: &mut W, message: impl Display) {
        self.emit(w, Status::Info, message);
    }

    fn render(&self, status: Status, message: &str) -> String {
        if self.config.is_json_log() {
            let event = StatusEvent {
                time: Timestamp::now(),
                status: status.as_str(),
                msg: message,
            };
            match serde_json::to_string(&event) {
                Ok(json) => format!("{json}\n"),
                Err(_) => format!("{message}\n"),
            }
        } else if self.config.plain {
            format!("{message}\n")
        } else {
            format!("{}  {message}\n", status.icon())
        }
    }
}
