//! Error types and result alias for the mac-apps crate.
use std::{io, result::Result as StdResult};

use thiserror::Error;

/// Convenient result type used throughout this crate.
pub type Result<T> = StdResult<T, Error>;

/// Error variants produced by this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// `osascript` ran but the script failed.
    #[error("AppleScript failed: {0}")]
    Script(String),
    /// `open` could not be started.
    #[error("Failed to launch {path}: {source}")]
    Launch {
        /// Bundle being launched.
        path: String,
        /// Underlying spawn error.
        #[source]
        source: io::Error,
    },
    /// No running application has this pid.
    #[error("No running application with pid {0}")]
    NotRunning(i32),
    /// The application refused activation.
    #[error("Activation failed for pid {0}")]
    ActivationFailed(i32),
    /// Generic I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
