//! Spinner for long-running steps
//!
//! A spinner shows an animated indicator while a step runs and resolves to a
//! single success or failure line. In JSON mode the pending and final states
//! are plain status events; on limited consoles only the message is printed.

use std::fmt::Display;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::sink::SinkTerm;
use super::{OutputConfig, SharedSink, StatusReporter};

const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Arrow frames, followed by the (empty) finished frame
const TICK_CHARS: &str = "←↖↑↗→↘↓↙ ";

/// How a spinner's step ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
}

impl From<bool> for Outcome {
    fn from(ok: bool) -> Self {
        if ok { Self::Success } else { Self::Failure }
    }
}

/// Handle to a running spinner
///
/// Only the first [`Spinner::finish`] has an effect, even when several threads
/// race to call it.
#[derive(Debug)]
pub struct Spinner<W: Write + Send + 'static> {
    reporter: StatusReporter,
    sink: SharedSink<W>,
    message: String,
    bar: Option<ProgressBar>,
    reports_outcome: bool,
    finished: AtomicBool,
}

impl<W: Write + Send + 'static> Spinner<W> {
    /// Start a spinner for `message` on `sink`
    pub fn start(config: &OutputConfig, sink: SharedSink<W>, message: impl Display) -> Self {
        let message = message.to_string();
        let reporter = StatusReporter::new(config.clone());

        let bar = if config.decorated() {
            Some(animate(&sink, &message))
        } else {
            // JSON: a pending event. Plain: the bare message.
            reporter.pending(&mut sink.clone(), &message);
            None
        };

        Self {
            reporter,
            sink,
            message,
            bar,
            reports_outcome: !config.plain || config.is_json_log(),
            finished: AtomicBool::new(false),
        }
    }

    /// Stop the animation and report the outcome
    ///
    /// Subsequent calls are ignored. On limited consoles this does nothing.
    pub fn finish(&self, outcome: impl Into<Outcome>) {
        if !self.reports_outcome {
            return;
        }
        if self
            .finished
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }

        let mut out = self.sink.clone();
        match outcome.into() {
            Outcome::Success => self.reporter.success(&mut out, &self.message),
            Outcome::Failure => self.reporter.failure(&mut out, &self.message),
        }
    }
}

fn animate<W: Write + Send + 'static>(sink: &SharedSink<W>, message: &str) -> ProgressBar {
    let target = ProgressDrawTarget::term_like(Box::new(SinkTerm::new(sink.clone())));
    let bar = ProgressBar::with_draw_target(None, target);
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan}{msg}")
            .expect("valid template")
            .tick_chars(TICK_CHARS),
    );
    bar.set_message(format!("  {message}"));
    bar.enable_steady_tick(TICK_INTERVAL);
    bar
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Barrier};
    use std::thread;

    use super::*;
    use crate::output::Status;

    fn json_config() -> OutputConfig {
        let mut config = OutputConfig::default();
        config.enable_json_log();
        config
    }

    fn contents(sink: &SharedSink<Vec<u8>>) -> String {
        String::from_utf8(sink.lock().clone()).unwrap()
    }

    fn statuses(output: &str) -> Vec<String> {
        output
            .lines()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value["status"].as_str().unwrap().to_string()
            })
            .collect()
    }

    /// Finish `spinner` from `threads` threads at once, alternating outcomes.
    fn race_finish(spinner: Spinner<Vec<u8>>, threads: usize) {
        let spinner = Arc::new(spinner);
        let barrier = Arc::new(Barrier::new(threads));
        let handles: Vec<_> = (0..threads)
            .map(|i| {
                let spinner = Arc::clone(&spinner);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    spinner.finish(i % 2 == 0);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_outcome_from_bool() {
        assert_eq!(Outcome::from(true), Outcome::Success);
        assert_eq!(Outcome::from(false), Outcome::Failure);
    }

    #[test]
    fn test_json_pending_then_success() {
        let sink = SharedSink::new(Vec::new());
        let spinner = Spinner::start(
            &json_config(),
            sink.clone(),
            format_args!("Installing {}", "runtime"),
        );
        assert!(spinner.bar.is_none());
        assert_eq!(statuses(&contents(&sink)), ["pending"]);

        spinner.finish(Outcome::Success);
        spinner.finish(Outcome::Failure);

        let output = contents(&sink);
        assert_eq!(statuses(&output), ["pending", "success"]);
        for line in output.lines() {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["msg"], "Installing runtime");
        }
    }

    #[test]
    fn test_json_failure() {
        let sink = SharedSink::new(Vec::new());
        let spinner = Spinner::start(&json_config(), sink.clone(), "Downloading");
        spinner.finish(false);
        assert_eq!(statuses(&contents(&sink)), ["pending", "failure"]);
    }

    #[test]
    fn test_plain_prints_message_and_ignores_finish() {
        let sink = SharedSink::new(Vec::new());
        let config = OutputConfig {
            plain: true,
            ..Default::default()
        };
        let spinner = Spinner::start(&config, sink.clone(), "Extracting files");
        assert!(spinner.bar.is_none());

        spinner.finish(Outcome::Success);
        spinner.finish(Outcome::Failure);
        assert_eq!(contents(&sink), "Extracting files\n");
    }

    #[test]
    fn test_human_reports_outcome_once() {
        let sink = SharedSink::new(Vec::new());
        let spinner = Spinner::start(&OutputConfig::default(), sink.clone(), "Starting dashboard");
        assert!(spinner.bar.is_some());

        thread::sleep(Duration::from_millis(250));
        spinner.finish(Outcome::Failure);
        spinner.finish(Outcome::Success);

        let output = contents(&sink);
        assert!(output.ends_with(&format!("{}  Starting dashboard\n", Status::Failure.icon())));
        assert_eq!(output.matches(Status::Failure.icon()).count(), 1);
        assert!(!output.contains(Status::Success.icon()));
    }

    #[test]
    fn test_human_draws_frames_before_finish() {
        let sink = SharedSink::new(Vec::new());
        let spinner = Spinner::start(&OutputConfig::default(), sink.clone(), "Starting dashboard");

        thread::sleep(Duration::from_millis(450));
        let frames = contents(&sink);
        spinner.finish(Outcome::Success);

        assert!(frames.contains("  Starting dashboard"));
        assert!(TICK_CHARS.trim_end().chars().any(|c| frames.contains(c)));
        assert!(!frames.contains(Status::Success.icon()));

        let output = contents(&sink);
        assert!(output.starts_with(&frames));
        let last_line = format!("{}  Starting dashboard\n", Status::Success.icon());
        assert!(output.ends_with(&last_line));
    }

    #[test]
    fn test_concurrent_finish_json_emits_one_line() {
        for _ in 0..50 {
            let sink = SharedSink::new(Vec::new());
            let spinner = Spinner::start(&json_config(), sink.clone(), "Racing");
            race_finish(spinner, 8);

            let statuses = statuses(&contents(&sink));
            assert_eq!(statuses.len(), 2);
            assert_eq!(statuses[0], "pending");
            assert!(statuses[1] == "success" || statuses[1] == "failure");
        }
    }

    #[test]
    fn test_concurrent_finish_human_emits_one_line() {
        for _ in 0..10 {
            let sink = SharedSink::new(Vec::new());
            let spinner = Spinner::start(&OutputConfig::default(), sink.clone(), "Racing");
            race_finish(spinner, 8);

            let output = contents(&sink);
            let outcomes = output.matches(Status::Success.icon()).count()
                + output.matches(Status::Failure.icon()).count();
            assert_eq!(outcomes, 1);
        }
    }
}
