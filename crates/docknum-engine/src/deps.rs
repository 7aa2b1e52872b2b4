//! Capabilities the engine consumes.
//!
//! The engine never touches the OS directly. Global hotkey registration, the
//! Dock contents, and application lookup/launch/activation all come in through
//! these traits, so the binary can plug in native implementations and tests can
//! plug in the mocks from [`crate::test_support`].

use std::path::{Path, PathBuf};

use config::{KeyCode, ModifierKey};

use crate::Result;

/// Identifier a hotkey is bound and dispatched under.
pub type HotkeyId = u32;

/// Opaque token for one successful OS-level registration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RegistrationHandle(pub u64);

// ---- Hotkey API abstraction ----

/// Hotkey Registration Service.
///
/// Registrations are independent: one failing must not affect the others.
/// Fired notifications are delivered by the host event loop, which forwards
/// them to [`crate::Engine::dispatch`].
pub trait HotkeyApi {
    /// Install a global listener for `key` held with `modifier`, reporting `id`.
    fn register(
        &self,
        key: KeyCode,
        modifier: ModifierKey,
        id: HotkeyId,
    ) -> Result<RegistrationHandle>;

    /// Release a listener previously returned by [`HotkeyApi::register`].
    fn unregister(&self, handle: RegistrationHandle) -> Result<()>;
}

// ---- Dock ----

/// Dock Enumerator.
pub trait DockSource: Send + Sync {
    /// Display names of the Dock's applications in Dock order. Failure is
    /// reported as an empty list (and logged by the implementation).
    fn dock_apps(&self) -> Vec<String>;
}

// ---- Applications ----

/// A running application, held as a weak reference: the process it names may
/// exit at any time, so liveness must be checked at the point of use.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunningApp {
    /// Process id.
    pub pid: i32,
    /// Display name.
    pub name: String,
    /// Stable identifier (bundle id on macOS), when known.
    pub identifier: Option<String>,
}

/// How to look up a running application.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AppQuery<'a> {
    /// Match by display name.
    Name(&'a str),
    /// Match by stable identifier.
    Identifier(&'a str),
}

/// Options for [`AppService::launch`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LaunchOptions {
    /// Bring the application to the foreground.
    pub activate: bool,
    /// Reuse a running instance instead of starting a second one.
    pub reuse_existing: bool,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            activate: true,
            reuse_existing: true,
        }
    }
}

/// Application Directory/Process Service.
pub trait AppService: Send + Sync {
    /// Search the well-known install locations for `name`'s launchable artifact.
    fn resolve_path(&self, name: &str) -> Option<PathBuf>;

    /// True if `path` still refers to a launchable artifact.
    fn is_launchable(&self, path: &Path) -> bool;

    /// Find a running application.
    fn find_running(&self, query: AppQuery<'_>) -> Option<RunningApp>;

    /// True if `app` still refers to a live process.
    fn is_alive(&self, app: &RunningApp) -> bool;

    /// Bring a running application to the foreground.
    fn activate(&self, app: &RunningApp) -> Result<()>;

    /// Launch the artifact at `path`. Fire-and-forget: returns once the
    /// request has been handed to the OS.
    fn launch(&self, path: &Path, options: LaunchOptions) -> Result<()>;
}
