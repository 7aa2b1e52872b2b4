//! Native implementations of the engine's capabilities.

use std::path::{Path, PathBuf};

use config::{KeyCode, ModifierKey};
use docknum_engine::{
    Error, Result, RunningApp,
    deps::{AppQuery, AppService, DockSource, HotkeyApi, HotkeyId, LaunchOptions, RegistrationHandle},
};
use mac_apps::{AppInfo, workspace};
use mac_hotkey::HotkeyManager;

/// Carbon global hotkeys.
pub struct CarbonHotkeys {
    manager: HotkeyManager,
}

impl CarbonHotkeys {
    /// Register through `manager`.
    pub fn new(manager: HotkeyManager) -> Self {
        Self { manager }
    }
}

impl HotkeyApi for CarbonHotkeys {
    fn register(
        &self,
        key: KeyCode,
        modifier: ModifierKey,
        id: HotkeyId,
    ) -> Result<RegistrationHandle> {
        self.manager
            .register(key, modifier, id)
            .map(|os_id| RegistrationHandle(u64::from(os_id)))
            .map_err(|e| Error::Registration(e.to_string()))
    }

    fn unregister(&self, handle: RegistrationHandle) -> Result<()> {
        let os_id = u32::try_from(handle.0).map_err(|_| Error::UnknownHandle(handle.0))?;
        self.manager
            .unregister(os_id)
            .map_err(|_| Error::UnknownHandle(handle.0))
    }
}

/// The Dock, read through System Events.
pub struct SystemDock;

impl DockSource for SystemDock {
    fn dock_apps(&self) -> Vec<String> {
        mac_apps::dock_apps()
    }
}

/// Applications via the filesystem, `NSWorkspace` and `open`.
pub struct WorkspaceApps;

fn running(info: AppInfo) -> RunningApp {
    RunningApp {
        pid: info.pid,
        name: info.name,
        identifier: info.bundle_id,
    }
}

fn app_info(app: &RunningApp) -> AppInfo {
    AppInfo {
        pid: app.pid,
        name: app.name.clone(),
        bundle_id: app.identifier.clone(),
    }
}

impl AppService for WorkspaceApps {
    fn resolve_path(&self, name: &str) -> Option<PathBuf> {
        mac_apps::resolve_app_path(name)
    }

    fn is_launchable(&self, path: &Path) -> bool {
        mac_apps::is_app_bundle(path)
    }

    fn find_running(&self, query: AppQuery<'_>) -> Option<RunningApp> {
        let found = match query {
            AppQuery::Name(name) => workspace::find_by_name(name),
            AppQuery::Identifier(id) => workspace::find_by_bundle_id(id),
        };
        found.map(running)
    }

    fn is_alive(&self, app: &RunningApp) -> bool {
        workspace::is_running(&app_info(app))
    }

    fn activate(&self, app: &RunningApp) -> Result<()> {
        workspace::activate(&app_info(app)).map_err(|e| Error::App(e.to_string()))
    }

    fn launch(&self, path: &Path, options: LaunchOptions) -> Result<()> {
        mac_apps::open_app(path, options.activate, options.reuse_existing)
            .map_err(|e| Error::App(e.to_string()))
    }
}
