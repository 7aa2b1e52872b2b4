//! Docknum Engine
//!
//! Turns Dock slot hotkeys into application activations and launches:
//! - [`SlotCache`] maps slots 1..=10 to the Dock's applications
//! - [`Launcher`] activates running apps at once and debounces cold launches
//! - [`ComboDispatcher`] fires a staggered sequence of requests from one key
//! - [`HotkeyRouter`] owns the global hotkey registrations and dispatches ids
//!
//! [`Engine`] wires these together. The host constructs it with its native
//! [`Services`], calls [`Engine::refresh`] and [`Engine::install_hotkeys`] at
//! startup, forwards every fired hotkey id to [`Engine::dispatch`] from its
//! event loop, and calls [`Engine::shutdown`] on exit.
//!
//! The crate is platform-neutral; all OS access goes through [`deps`].

mod combo;
pub mod deps;
mod error;
mod launcher;
mod report;
mod router;
mod scheduler;
mod services;
mod slot_cache;
pub mod test_support;

use std::sync::Arc;

use config::{KeyCode, Settings, Slot};
use tracing::{info, warn};

pub use combo::{ComboDispatcher, activate_or_launch};
pub use deps::{HotkeyId, RunningApp};
pub use error::{Error, Result};
pub use launcher::{LaunchOutcome, LaunchToken, Launcher};
pub use report::{MappingReport, SlotRow, SlotStatus};
pub use router::{
    Action, COMBO_HOTKEY_ID, HotkeyBinding, HotkeyRouter, RegistrationSummary, RouterState,
    slot_hotkey_id,
};
pub use scheduler::Scheduler;
pub use services::Services;
pub use slot_cache::{AppDescriptor, SlotCache, SlotMap, assign_slots};

use crate::deps::{AppService, DockSource};

/// Coordinates the slot cache, launcher, combo dispatcher and hotkey router.
///
/// Lives on the host's event-loop thread. Deferred work runs on the
/// [`Scheduler`]'s runtime.
pub struct Engine {
    /// Resolved settings, fixed for the engine's lifetime.
    settings: Settings,
    /// Current slot mapping.
    cache: Arc<SlotCache>,
    /// Slot requests.
    launcher: Launcher,
    /// Combo requests.
    combo: ComboDispatcher,
    /// Hotkey registrations and actions.
    router: HotkeyRouter,
    /// Dock contents, read on refresh.
    dock: Arc<dyn DockSource>,
    /// Application lookup, read on refresh.
    apps: Arc<dyn AppService>,
    /// Deferred launches.
    scheduler: Scheduler,
}

impl Engine {
    /// Build an engine. Nothing is registered or enumerated until
    /// [`Engine::refresh`] and [`Engine::install_hotkeys`] are called.
    pub fn new(settings: Settings, services: Services, scheduler: Scheduler) -> Self {
        let Services {
            hotkeys,
            dock,
            apps,
        } = services;
        let cache = Arc::new(SlotCache::new());
        let launcher = Launcher::new(
            cache.clone(),
            apps.clone(),
            scheduler.clone(),
            settings.launch_delay,
        );
        let combo = ComboDispatcher::new(apps.clone(), scheduler.clone(), settings.stagger);
        Self {
            settings,
            cache,
            launcher,
            combo,
            router: HotkeyRouter::new(hotkeys),
            dock,
            apps,
            scheduler,
        }
    }

    /// The engine's settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Rebuild the slot mapping from the Dock.
    pub fn refresh(&self) -> MappingReport {
        let map = self
            .cache
            .refresh(self.dock.as_ref(), self.apps.as_ref(), &self.settings);
        MappingReport::new(&map, &self.settings)
    }

    /// The application currently assigned to `slot`.
    pub fn lookup(&self, slot: Slot) -> Option<Arc<AppDescriptor>> {
        self.cache.lookup(slot)
    }

    /// Bind one hotkey per slot plus the combo, then register them all.
    ///
    /// Slot actions look the slot up at press time, so later refreshes need
    /// no rebinding. A digit combo takes over its slot's key.
    pub fn install_hotkeys(&mut self) -> RegistrationSummary {
        let modifier = self.settings.modifier;
        let combo_slot = self.settings.combo_slot();

        for slot in Slot::all().filter(|s| Some(*s) != combo_slot) {
            let launcher = self.launcher.clone();
            self.router.bind(
                HotkeyBinding {
                    id: slot_hotkey_id(slot),
                    key: KeyCode::for_slot(slot),
                    modifier,
                },
                Box::new(move || {
                    launcher.request(slot);
                }),
            );
        }

        if let Some(spec) = &self.settings.combo {
            let combo = self.combo.clone();
            let names = spec.apps.clone();
            self.router.bind(
                HotkeyBinding {
                    id: COMBO_HOTKEY_ID,
                    key: spec.trigger.key(),
                    modifier,
                },
                Box::new(move || {
                    combo.fire(&names);
                }),
            );
        }

        let summary = self.router.register_all();
        if summary.registered == 0 && summary.attempted > 0 {
            warn!(
                attempted = summary.attempted,
                hint = "check Accessibility permission and whether another app owns these shortcuts",
                "no_hotkeys_registered"
            );
        } else {
            info!(
                registered = summary.registered,
                failed = summary.failed(),
                modifier = %modifier,
                "hotkeys_installed"
            );
        }
        summary
    }

    /// Handle a fired hotkey. Unknown ids are ignored. Returns true if an
    /// action ran.
    pub fn dispatch(&self, id: HotkeyId) -> bool {
        self.router.dispatch(id)
    }

    /// Request `slot` directly, as its hotkey would.
    pub fn request(&self, slot: Slot) -> LaunchOutcome {
        self.launcher.request(slot)
    }

    /// Currently active hotkey bindings.
    pub fn active_bindings(&self) -> Vec<HotkeyBinding> {
        self.router.active()
    }

    /// Release all hotkeys and drop pending launches. Safe to call twice.
    pub fn shutdown(&mut self) {
        let released = self.router.unbind_all();
        self.scheduler.shutdown();
        info!(released, "engine_shutdown");
    }
}
