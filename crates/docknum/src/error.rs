//! Errors that stop the docknum process.
#[cfg(target_os = "macos")]
use std::io;
use std::result::Result as StdResult;

use thiserror::Error;

/// Result alias for the binary.
pub type Result<T> = StdResult<T, Error>;

/// Startup failures. Anything after startup is logged, not returned.
#[derive(Debug, Error)]
pub enum Error {
    /// The async runtime could not be built.
    #[cfg(target_os = "macos")]
    #[error("Failed to start runtime: {0}")]
    Runtime(#[from] io::Error),

    /// The OS hotkey manager could not be created.
    #[cfg(target_os = "macos")]
    #[error(transparent)]
    Hotkeys(#[from] mac_hotkey::Error),

    /// This platform has no hotkey or application backend.
    #[cfg(not(target_os = "macos"))]
    #[error("docknum only runs on macOS")]
    UnsupportedPlatform,
}
