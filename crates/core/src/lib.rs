//! sk-core: Core library for the sk CLI
//!
//! This crate provides the parts of the CLI that do not touch the terminal:
//! - Configuration management
//! - Companion binary path resolution
//! - Version and build-info discovery for companion binaries

pub mod config;
pub mod error;
pub mod paths;
pub mod version;

pub use config::{Config, ConfigManager};
pub use error::{Error, Result};
pub use paths::{binary_file_path, default_bin_dir, DASHBOARD_BINARY, RUNTIME_BINARY};
pub use version::{
    CliBuild, CommandRunner, ProbeFlag, SystemRunner, VersionProber, VERSION_UNAVAILABLE,
};
