//! Companion binary locations
//!
//! Companion binaries live in a single installation directory. Only the file
//! name differs between platforms.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable overriding the installation directory
pub const BIN_DIR_ENV: &str = "SK_BIN_DIR";

/// Runtime companion binary name (without extension)
pub const RUNTIME_BINARY: &str = "sidekickd";

/// Dashboard companion binary name (without extension)
pub const DASHBOARD_BINARY: &str = "dashboard";

const INSTALL_DIR: &str = ".sidekick";

/// Resolve the installation directory for companion binaries
///
/// `SK_BIN_DIR` wins when set and non-empty, then `configured`, then
/// `~/.sidekick/bin`.
pub fn default_bin_dir(configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(BIN_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    if let Some(dir) = configured {
        return Ok(dir.to_path_buf());
    }

    let home = dirs::home_dir()
        .ok_or_else(|| Error::Config("Could not determine home directory".into()))?;
    Ok(home.join(INSTALL_DIR).join("bin"))
}

/// Path of an executable named `name` inside `dir`
pub fn binary_file_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(executable_name(name))
}

#[cfg(windows)]
fn executable_name(name: &str) -> String {
    format!("{name}.exe")
}

#[cfg(not(windows))]
fn executable_name(name: &str) -> String {
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(windows))]
    fn test_binary_file_path_unix() {
        let path = binary_file_path(Path::new("/opt/sk/bin"), RUNTIME_BINARY);
        assert_eq!(path, PathBuf::from("/opt/sk/bin/sidekickd"));
    }

    #[test]
    #[cfg(windows)]
    fn test_binary_file_path_windows() {
        let path = binary_file_path(Path::new(r"C:\sk\bin"), DASHBOARD_BINARY);
        assert_eq!(path, PathBuf::from(r"C:\sk\bin\dashboard.exe"));
    }

    #[test]
    fn test_default_bin_dir_configured() {
        // Only meaningful when the override variable is absent from the test env.
        if std::env::var_os(BIN_DIR_ENV).is_some() {
            return;
        }
        let dir = default_bin_dir(Some(Path::new("/srv/sidekick"))).unwrap();
        assert_eq!(dir, PathBuf::from("/srv/sidekick"));
    }

    #[test]
    fn test_default_bin_dir_home() {
        if std::env::var_os(BIN_DIR_ENV).is_some() || dirs::home_dir().is_none() {
            return;
        }
        let dir = default_bin_dir(None).unwrap();
        assert!(dir.ends_with(".sidekick/bin"));
    }
}
