//! macOS application plumbing for docknum.
//!
//! - [`AppInfo`]: a running application and the check that its pid is still its own
//! - [`dock`]: the Dock's application names, via System Events
//! - [`bundle`]: finding `.app` bundles in the standard install locations
//! - [`launch`]: opening bundles through LaunchServices (`open`)
//! - `workspace` (macOS only): running applications, liveness and activation
//!
//! Everything except `workspace` is plain process and filesystem work and
//! builds on any platform, which keeps it testable off macOS.

mod app_info;
pub mod bundle;
pub mod dock;
mod error;
pub mod launch;
#[cfg(target_os = "macos")]
pub mod workspace;

pub use app_info::AppInfo;
pub use bundle::{is_app_bundle, resolve_app_path};
pub use dock::dock_apps;
pub use error::{Error, Result};
pub use launch::open_app;
