//! Global hotkey registration for docknum.
//!
//! Wraps the `global-hotkey` crate: registers modifier + key combinations by
//! docknum's own [`config::KeyCode`] and [`config::ModifierKey`], and reports
//! presses under the caller's ids rather than the OS-assigned ones.
//!
//! Only [`Error`] is available on platforms other than macOS.

mod error;
#[cfg(target_os = "macos")]
mod keymap;
#[cfg(target_os = "macos")]
mod manager;

pub use error::{Error, Result};
#[cfg(target_os = "macos")]
pub use manager::HotkeyManager;
