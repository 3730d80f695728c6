//! Colours for human-readable output
//!
//! Values are only painted when the console is decorated. JSON and plain
//! output always get the bare text, so messages stay machine-readable.

use std::fmt::Display;

use console::Style;

use super::OutputConfig;

/// Colour helpers bound to an [`OutputConfig`]
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            enabled: config.decorated(),
        }
    }

    /// Bright bold green, for versions that were found
    pub fn green(&self, text: impl Display) -> String {
        self.paint(&Style::new().green().bright().bold(), text)
    }

    /// Bright bold yellow, for paths that need attention
    pub fn yellow(&self, text: impl Display) -> String {
        self.paint(&Style::new().yellow().bright().bold(), text)
    }

    /// Bold white, for emphasised values
    pub fn white_bold(&self, text: impl Display) -> String {
        self.paint(&Style::new().white().bold(), text)
    }

    fn paint(&self, style: &Style, text: impl Display) -> String {
        if self.enabled {
            style.apply_to(text).to_string()
        } else {
            text.to_string()
        }
    }
}
