use std::{io, result::Result as StdResult};

use thiserror::Error;

/// Convenient result type for the engine crate.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for the docknum engine and its capabilities.
#[derive(Debug, Error)]
pub enum Error {
    /// The hotkey service refused a registration (conflict, permission).
    #[error("Hotkey registration failed: {0}")]
    Registration(String),

    /// An unregister call referenced a handle the service does not know.
    #[error("Unknown hotkey registration handle: {0}")]
    UnknownHandle(u64),

    /// The scheduler no longer accepts work.
    #[error("Scheduler has shut down")]
    ShutDown,

    /// Launching or activating an application failed.
    #[error("Application error: {0}")]
    App(String),

    /// I/O failure while performing a system operation.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
