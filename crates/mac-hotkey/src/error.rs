//! Error types and result alias for the mac-hotkey crate.
use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type used throughout this crate.
pub type Result<T> = StdResult<T, Error>;

/// Error variants produced by this crate.
#[derive(Error, Debug)]
pub enum Error {
    /// The OS hotkey manager could not be created.
    #[error("Hotkey manager unavailable: {0}")]
    Manager(String),
    /// The OS refused a registration, usually because another app owns it.
    #[error("Failed to register {chord}: {reason}")]
    Register {
        /// Human-readable modifier + key.
        chord: String,
        /// OS-provided reason.
        reason: String,
    },
    /// No active registration exists for the provided id.
    #[error("Invalid registration id {0}")]
    InvalidId(u32),
}
