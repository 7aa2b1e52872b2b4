//! In-memory capabilities for engine tests.
//!
//! These mocks record every call so tests can assert on what the engine asked
//! the OS to do, and when. Timestamps use `tokio::time::Instant`, which follows
//! the paused clock in `start_paused` tests.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::Arc,
};

use config::{KeyCode, ModifierKey};
use parking_lot::Mutex;
use tokio::time::Instant;

use crate::{
    Error, Result,
    deps::{
        AppQuery, AppService, DockSource, HotkeyApi, HotkeyId, LaunchOptions,
        RegistrationHandle, RunningApp,
    },
};

/// A recorded hotkey registration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    /// Key registered.
    pub key: KeyCode,
    /// Modifier registered.
    pub modifier: ModifierKey,
    /// Id the binding reports.
    pub id: HotkeyId,
}

#[derive(Default)]
struct HotkeyState {
    next: u64,
    active: HashMap<u64, Registration>,
    failing: HashSet<KeyCode>,
    attempts: usize,
    unregistered: usize,
}

/// Hotkey service that never touches the OS.
#[derive(Clone, Default)]
pub struct MockHotkeyApi {
    state: Arc<Mutex<HotkeyState>>,
}

impl MockHotkeyApi {
    /// A service on which every registration succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every registration of `key` fail.
    pub fn fail_on(&self, key: KeyCode) {
        self.state.lock().failing.insert(key);
    }

    /// Currently active registrations, sorted by id.
    pub fn active(&self) -> Vec<Registration> {
        let mut v: Vec<Registration> = self.state.lock().active.values().cloned().collect();
        v.sort_by_key(|r| r.id);
        v
    }

    /// Total register calls, including failures.
    pub fn attempts(&self) -> usize {
        self.state.lock().attempts
    }

    /// Total successful unregister calls.
    pub fn unregistered(&self) -> usize {
        self.state.lock().unregistered
    }
}

impl HotkeyApi for MockHotkeyApi {
    fn register(
        &self,
        key: KeyCode,
        modifier: ModifierKey,
        id: HotkeyId,
    ) -> Result<RegistrationHandle> {
        let mut st = self.state.lock();
        st.attempts += 1;
        if st.failing.contains(&key) {
            return Err(Error::Registration(format!("{modifier}+{key} is taken")));
        }
        st.next += 1;
        let handle = st.next;
        st.active.insert(handle, Registration { key, modifier, id });
        Ok(RegistrationHandle(handle))
    }

    fn unregister(&self, handle: RegistrationHandle) -> Result<()> {
        let mut st = self.state.lock();
        match st.active.remove(&handle.0) {
            Some(_) => {
                st.unregistered += 1;
                Ok(())
            }
            None => Err(Error::UnknownHandle(handle.0)),
        }
    }
}

/// Dock whose contents tests can change between refreshes.
#[derive(Default)]
pub struct MockDock {
    names: Mutex<Vec<String>>,
}

impl MockDock {
    /// A Dock listing `names` in order.
    pub fn new(names: &[&str]) -> Self {
        let dock = Self::default();
        dock.set(names);
        dock
    }

    /// Replace the Dock contents.
    pub fn set(&self, names: &[&str]) {
        *self.names.lock() = names.iter().map(|s| s.to_string()).collect();
    }
}

impl DockSource for MockDock {
    fn dock_apps(&self) -> Vec<String> {
        self.names.lock().clone()
    }
}

/// Something the engine asked the app service to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppOp {
    /// Bring a running app (by name) to the foreground.
    Activate(String),
    /// Launch the artifact at a path.
    Launch(PathBuf),
}

/// A recorded [`AppOp`] with the (tokio) time it was issued.
#[derive(Clone, Debug)]
pub struct AppCall {
    /// What was requested.
    pub op: AppOp,
    /// When it was requested.
    pub at: Instant,
}

#[derive(Default)]
struct AppsState {
    installed: HashMap<String, PathBuf>,
    running: HashMap<String, RunningApp>,
    calls: Vec<AppCall>,
}

/// Application service backed by in-memory tables.
#[derive(Clone, Default)]
pub struct MockApps {
    state: Arc<Mutex<AppsState>>,
}

impl MockApps {
    /// Nothing installed, nothing running.
    pub fn new() -> Self {
        Self::default()
    }

    /// Identifier assigned to `name` by [`MockApps::start`].
    pub fn identifier_for(name: &str) -> String {
        format!("com.example.{name}")
    }

    /// Install `name` under `/Applications`, returning its bundle path.
    pub fn install(&self, name: &str) -> PathBuf {
        let path = PathBuf::from(format!("/Applications/{name}.app"));
        self.state
            .lock()
            .installed
            .insert(name.to_string(), path.clone());
        path
    }

    /// Remove `name`'s bundle; previously resolved paths stop being launchable.
    pub fn uninstall(&self, name: &str) {
        self.state.lock().installed.remove(name);
    }

    /// Start `name` with `pid`.
    pub fn start(&self, name: &str, pid: i32) -> RunningApp {
        let app = RunningApp {
            pid,
            name: name.to_string(),
            identifier: Some(Self::identifier_for(name)),
        };
        self.state
            .lock()
            .running
            .insert(name.to_string(), app.clone());
        app
    }

    /// Terminate `name`.
    pub fn quit(&self, name: &str) {
        self.state.lock().running.remove(name);
    }

    /// Every recorded call, in issue order.
    pub fn calls(&self) -> Vec<AppCall> {
        self.state.lock().calls.clone()
    }

    /// Recorded operations without timestamps.
    pub fn ops(&self) -> Vec<AppOp> {
        self.calls().into_iter().map(|c| c.op).collect()
    }

    /// Paths passed to `launch`.
    pub fn launches(&self) -> Vec<PathBuf> {
        self.ops()
            .into_iter()
            .filter_map(|op| match op {
                AppOp::Launch(p) => Some(p),
                AppOp::Activate(_) => None,
            })
            .collect()
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    fn record(&self, op: AppOp) {
        self.state.lock().calls.push(AppCall {
            op,
            at: Instant::now(),
        });
    }
}

impl AppService for MockApps {
    fn resolve_path(&self, name: &str) -> Option<PathBuf> {
        self.state.lock().installed.get(name).cloned()
    }

    fn is_launchable(&self, path: &Path) -> bool {
        self.state.lock().installed.values().any(|p| p == path)
    }

    fn find_running(&self, query: AppQuery<'_>) -> Option<RunningApp> {
        let st = self.state.lock();
        match query {
            AppQuery::Name(name) => st.running.get(name).cloned(),
            AppQuery::Identifier(id) => st
                .running
                .values()
                .find(|r| r.identifier.as_deref() == Some(id))
                .cloned(),
        }
    }

    fn is_alive(&self, app: &RunningApp) -> bool {
        self.state.lock().running.values().any(|r| r.pid == app.pid)
    }

    fn activate(&self, app: &RunningApp) -> Result<()> {
        if !self.is_alive(app) {
            return Err(Error::App(format!("{} (pid {}) has exited", app.name, app.pid)));
        }
        self.record(AppOp::Activate(app.name.clone()));
        Ok(())
    }

    fn launch(&self, path: &Path, _options: LaunchOptions) -> Result<()> {
        self.record(AppOp::Launch(path.to_path_buf()));
        Ok(())
    }
}
