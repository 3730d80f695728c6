//! Output formatter for command results
//!
//! Status lines go through [`super::StatusReporter`]; this formatter prints
//! the actual result of a command, either as text or as a JSON document.

use console::style;
use serde::Serialize;

use super::OutputConfig;

/// Formatter for command results
///
/// When JSON mode is enabled, results are strict JSON without colors.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    config: OutputConfig,
}

impl Formatter {
    /// Create a new formatter with the given configuration
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Check if JSON output mode is enabled
    pub fn is_json(&self) -> bool {
        self.config.json
    }

    /// Check if colors are enabled
    pub fn colors_enabled(&self) -> bool {
        !self.config.plain && !self.config.json
    }

    /// Output an error message
    ///
    /// Errors are always printed, even in quiet mode.
    pub fn error(&self, message: &str) {
        if self.config.json {
            let error = serde_json::json!({
                "error": message
            });
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&error).unwrap_or_else(|_| message.to_string())
            );
        } else if self.colors_enabled() {
            eprintln!("{} {message}", style("Error:").red().bold());
        } else {
            eprintln!("Error: {message}");
        }
    }

    /// Output JSON directly
    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error serializing output: {e}"),
        }
    }

    /// Print a line of text (respects quiet mode)
    pub fn println(&self, message: &str) {
        if self.config.quiet {
            return;
        }
        println!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatter_default() {
        let formatter = Formatter::default();
        assert!(!formatter.is_json());
        assert!(formatter.colors_enabled());
    }

    #[test]
    fn test_formatter_json_mode() {
        let config = OutputConfig {
            json: true,
            ..Default::default()
        };
        let formatter = Formatter::new(config);
        assert!(formatter.is_json());
        assert!(!formatter.colors_enabled());
    }

    #[test]
    fn test_formatter_plain() {
        let formatter = Formatter::new(OutputConfig::for_console(true));
        assert!(!formatter.colors_enabled());
    }

    #[test]
    fn test_formatter_json_log_keeps_colors() {
        let mut config = OutputConfig::default();
        config.enable_json_log();
        let formatter = Formatter::new(config);
        assert!(!formatter.is_json());
        assert!(formatter.colors_enabled());
    }
}
