//! Exit code definitions for the sk CLI
//!
//! Scripts rely on these values. Changing one is a breaking change.

/// Exit codes for the sk CLI application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Operation completed successfully
    Success = 0,

    /// General/unspecified error, including missing companion binaries
    GeneralError = 1,

    /// User input error: invalid arguments or configuration
    UsageError = 2,
}

impl ExitCode {
    /// Convert exit code to i32 for use with std::process::exit
    #[inline]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Create exit code from i32 value
    ///
    /// Returns None if the value doesn't correspond to a known exit code.
    /// Used to map `sk_core::Error::exit_code` back onto this enum.
    pub const fn from_i32(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Success),
            1 => Some(Self::GeneralError),
            2 => Some(Self::UsageError),
            _ => None,
        }
    }
}
