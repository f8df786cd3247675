#[cfg(target_os = "windows")]
use windows::core::Error as WinError;

use crate::core::LaunchError;

// Represents errors that can occur within the platform abstraction layer.
//
// The core never sees these directly: launch failures are folded into
// `LaunchError` and selection failures into `SelectionError`, so that the
// command model stays free of Win32 types.
#[derive(Debug, Clone)]
pub enum PlatformError {
    /// An error originating from the Windows API.
    #[cfg(target_os = "windows")]
    Win32(WinError),
    /// The path of the loaded extension module could not be determined.
    ModuleUnavailable(String),
}

#[cfg(target_os = "windows")]
impl From<WinError> for PlatformError {
    fn from(err: WinError) -> Self {
        PlatformError::Win32(err)
    }
}

impl std::fmt::Display for PlatformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            #[cfg(target_os = "windows")]
            PlatformError::Win32(e) => write!(f, "Win32 Error: {}", e),
            PlatformError::ModuleUnavailable(s) => write!(f, "Module Unavailable: {}", s),
        }
    }
}

impl std::error::Error for PlatformError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(target_os = "windows")]
            PlatformError::Win32(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PlatformError> for LaunchError {
    fn from(err: PlatformError) -> Self {
        LaunchError::Rejected(err.to_string())
    }
}

/// A specialized `Result` type for platform layer operations.
pub type Result<T> = std::result::Result<T, PlatformError>;
