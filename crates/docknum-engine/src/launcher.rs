//! Launch Debouncer.
//!
//! A slot request activates a live instance immediately. Otherwise the launch
//! is deferred by a short delay and tagged with a token; only the newest token
//! recorded for the slot is allowed to launch when the delay expires, which
//! collapses key chatter and autorepeat into a single launch.

use std::{
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use config::Slot;
use tracing::{debug, info, warn};

use crate::{
    deps::{AppQuery, AppService, LaunchOptions, RunningApp},
    scheduler::Scheduler,
    slot_cache::{AppDescriptor, SlotCache},
};

/// Marks one deferred launch. Tokens increase monotonically; 0 means none.
pub type LaunchToken = u64;

/// What a launch request did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// Nothing is assigned to the slot.
    Unassigned,
    /// A live instance was brought to the foreground.
    Activated,
    /// A launch was deferred under this token.
    Scheduled(LaunchToken),
    /// A launch was requested right away.
    Launched,
    /// No live instance and nothing launchable.
    NotFound,
    /// The OS rejected the request, or the engine is shutting down.
    Failed,
}

/// Pending tokens, one per slot, shared with deferred launches.
#[derive(Debug, Default)]
struct TokenTable {
    /// Last issued token.
    last: AtomicU64,
    /// Most recent token recorded per slot.
    pending: [AtomicU64; Slot::COUNT],
}

impl TokenTable {
    /// Issue a fresh token and record it as `slot`'s pending launch.
    fn issue(&self, slot: Slot) -> LaunchToken {
        let token = self.last.fetch_add(1, Ordering::AcqRel) + 1;
        self.pending[slot.index()].store(token, Ordering::Release);
        token
    }

    /// True if `token` is still the newest request for `slot`.
    fn is_current(&self, slot: Slot, token: LaunchToken) -> bool {
        self.pending[slot.index()].load(Ordering::Acquire) == token
    }
}

/// Turns slot requests into activations and debounced launches.
#[derive(Clone)]
pub struct Launcher {
    cache: Arc<SlotCache>,
    apps: Arc<dyn AppService>,
    scheduler: Scheduler,
    delay: Duration,
    tokens: Arc<TokenTable>,
}

impl Launcher {
    /// Launch slots from `cache`, deferring cold launches by `delay`.
    pub fn new(
        cache: Arc<SlotCache>,
        apps: Arc<dyn AppService>,
        scheduler: Scheduler,
        delay: Duration,
    ) -> Self {
        Self {
            cache,
            apps,
            scheduler,
            delay,
            tokens: Arc::new(TokenTable::default()),
        }
    }

    /// Handle one hotkey press for `slot`.
    ///
    /// 1. A cached instance that is still alive is activated at once.
    /// 2. A cached instance that has exited is dropped from the descriptor.
    /// 3. A launchable path schedules a debounced launch.
    /// 4. Otherwise the running process list is searched once by identifier.
    pub fn request(&self, slot: Slot) -> LaunchOutcome {
        let Some(desc) = self.cache.lookup(slot) else {
            debug!(slot = slot.get(), "slot_unassigned");
            return LaunchOutcome::Unassigned;
        };

        if let Some(app) = desc.running() {
            if self.apps.is_alive(&app) {
                return self.activate(slot, &desc, &app);
            }
            debug!(slot = slot.get(), app = desc.name(), pid = app.pid, "stale_handle_cleared");
            desc.set_running(None);
        }

        if let Some(path) = desc.path() {
            if self.apps.is_launchable(path) {
                return self.schedule(slot, desc.name(), path);
            }
            warn!(slot = slot.get(), app = desc.name(), path = %path.display(), "launch_path_missing");
        }

        self.fallback(slot, &desc)
    }

    /// The token a deferred launch for `slot` must carry to proceed.
    pub fn pending_token(&self, slot: Slot) -> LaunchToken {
        self.tokens.pending[slot.index()].load(Ordering::Acquire)
    }

    fn activate(&self, slot: Slot, desc: &AppDescriptor, app: &RunningApp) -> LaunchOutcome {
        match self.apps.activate(app) {
            Ok(()) => {
                info!(slot = slot.get(), app = desc.name(), pid = app.pid, "activated");
                LaunchOutcome::Activated
            }
            Err(e) => {
                warn!(slot = slot.get(), app = desc.name(), error = %e, "activate_failed");
                desc.set_running(None);
                LaunchOutcome::Failed
            }
        }
    }

    fn schedule(&self, slot: Slot, name: &str, path: &Path) -> LaunchOutcome {
        let token = self.tokens.issue(slot);
        let tokens = self.tokens.clone();
        let apps = self.apps.clone();
        let name = name.to_string();
        let path: PathBuf = path.to_path_buf();

        let scheduled = self.scheduler.after(self.delay, move || {
            if !tokens.is_current(slot, token) {
                info!(slot = slot.get(), app = %name, token, "launch_cancelled");
                return;
            }
            match apps.launch(&path, LaunchOptions::default()) {
                Ok(()) => info!(slot = slot.get(), app = %name, token, "launched"),
                Err(e) => warn!(slot = slot.get(), app = %name, error = %e, "launch_failed"),
            }
        });
        if let Err(e) = scheduled {
            debug!(slot = slot.get(), error = %e, "launch_not_scheduled");
            return LaunchOutcome::Failed;
        }
        debug!(
            slot = slot.get(),
            token,
            delay_ms = self.delay.as_millis(),
            "launch_scheduled"
        );
        LaunchOutcome::Scheduled(token)
    }

    fn fallback(&self, slot: Slot, desc: &AppDescriptor) -> LaunchOutcome {
        let found = desc
            .identifier()
            .and_then(|id| self.apps.find_running(AppQuery::Identifier(id)));
        match found {
            Some(app) => {
                desc.set_running(Some(app.clone()));
                self.activate(slot, desc, &app)
            }
            None => {
                warn!(slot = slot.get(), app = desc.name(), "app_not_found");
                LaunchOutcome::NotFound
            }
        }
    }
}
