//! Configuration management
//!
//! This module handles loading the sk configuration file.
//! The configuration file is stored in TOML format at ~/.config/sidekick/config.toml,
//! or under `$SK_CONFIG_DIR` when that variable is set.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Current configuration schema version
pub const SCHEMA_VERSION: u32 = 1;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "SK_CONFIG_DIR";

/// Default status output format
const DEFAULT_OUTPUT: &str = "human";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Schema version for migration support
    pub schema_version: u32,

    /// Default settings
    #[serde(default)]
    pub defaults: Defaults,
}

/// Default settings for CLI behavior
#[derive(Debug, Clone, Deserialize)]
pub struct Defaults {
    /// Status line format: "human" or "json"
    #[serde(default = "default_output")]
    pub output: String,

    /// Installation directory of companion binaries
    #[serde(default)]
    pub bin_dir: Option<PathBuf>,
}

fn default_output() -> String {
    DEFAULT_OUTPUT.to_string()
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            bin_dir: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            defaults: Defaults::default(),
        }
    }
}

impl Config {
    /// Whether status lines should be JSON by default
    pub fn json_output(&self) -> bool {
        self.defaults.output.eq_ignore_ascii_case("json")
    }
}

/// Configuration manager locates and loads the config file
#[derive(Debug)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the default config path
    pub fn new() -> Result<Self> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_path(PathBuf::from(dir).join("config.toml")));
        }

        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".into()))?;
        let config_path = config_dir.join("sidekick").join("config.toml");
        Ok(Self { config_path })
    }

    /// Create a ConfigManager with a custom path (useful for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the configuration file path
    pub fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    /// Load configuration from disk
    ///
    /// If the configuration file doesn't exist, returns a default configuration.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&self.config_path)?;
        let mut config: Config = toml::from_str(&content)?;

        if config.schema_version > SCHEMA_VERSION {
            return Err(Error::Config(format!(
                "Configuration file version {} is newer than supported version {}. \
                 Please upgrade sk.",
                config.schema_version, SCHEMA_VERSION
            )));
        }
        config.schema_version = SCHEMA_VERSION;

        match config.defaults.output.to_ascii_lowercase().as_str() {
            "human" | "json" => Ok(config),
            other => Err(Error::Config(format!(
                "Unknown output format '{other}'. Expected 'human' or 'json'"
            ))),
        }
    }
}
