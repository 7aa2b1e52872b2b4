//! Hotkey Router: binds ids to actions and owns the OS registrations.

use std::collections::{BTreeMap, HashSet};

use config::{KeyCode, ModifierKey, Slot};
use tracing::{debug, trace, warn};

use crate::deps::{HotkeyApi, HotkeyId, RegistrationHandle};

/// Id of the combo binding. Outside the slot range 1..=10.
pub const COMBO_HOTKEY_ID: HotkeyId = 99;

/// The id a slot's hotkey is bound under.
pub fn slot_hotkey_id(slot: Slot) -> HotkeyId {
    HotkeyId::from(slot.get())
}

/// One modifier + key combination and the id it reports.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HotkeyBinding {
    /// Id passed to [`HotkeyRouter::dispatch`] when the hotkey fires.
    pub id: HotkeyId,
    /// Physical key.
    pub key: KeyCode,
    /// Modifier held with the key.
    pub modifier: ModifierKey,
}

/// Result of [`HotkeyRouter::register_all`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RegistrationSummary {
    /// Bindings considered, including ones already active. Skipped
    /// duplicates are not counted.
    pub attempted: usize,
    /// Bindings now active.
    pub registered: usize,
}

impl RegistrationSummary {
    /// Bindings that failed to register.
    pub fn failed(&self) -> usize {
        self.attempted.saturating_sub(self.registered)
    }
}

/// Router lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RouterState {
    /// No OS registrations are held.
    Unregistered,
    /// Registrations are being attempted.
    Registering,
    /// Registration finished; successful bindings respond to events.
    Active,
}

/// A zero-argument action run on dispatch.
pub type Action = Box<dyn Fn()>;

/// A bound action and its registration, if it succeeded.
struct Entry {
    binding: HotkeyBinding,
    action: Action,
    handle: Option<RegistrationHandle>,
}

/// Maps hotkey ids to actions and keeps their OS registrations.
pub struct HotkeyRouter {
    api: Box<dyn HotkeyApi>,
    entries: BTreeMap<HotkeyId, Entry>,
    state: RouterState,
}

impl HotkeyRouter {
    /// A router with no bindings that registers through `api`.
    pub fn new(api: Box<dyn HotkeyApi>) -> Self {
        Self {
            api,
            entries: BTreeMap::new(),
            state: RouterState::Unregistered,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RouterState {
        self.state
    }

    /// Bind `action` under `binding.id`, replacing any previous binding for
    /// that id. Takes effect at the next [`HotkeyRouter::register_all`].
    pub fn bind(&mut self, binding: HotkeyBinding, action: Action) {
        if let Some(old) = self.entries.remove(&binding.id)
            && let Some(handle) = old.handle
        {
            self.release(old.binding, handle);
        }
        trace!(id = binding.id, key = %binding.key, "hotkey_bound");
        self.entries.insert(
            binding.id,
            Entry {
                binding,
                action,
                handle: None,
            },
        );
    }

    /// Register every binding not yet active. Each attempt is independent; a
    /// failure leaves that binding inactive and the rest unaffected. Bindings
    /// that repeat an already active key + modifier are skipped.
    pub fn register_all(&mut self) -> RegistrationSummary {
        self.state = RouterState::Registering;
        let mut taken: HashSet<(KeyCode, ModifierKey)> = self
            .entries
            .values()
            .filter(|e| e.handle.is_some())
            .map(|e| (e.binding.key, e.binding.modifier))
            .collect();
        let mut summary = RegistrationSummary::default();

        for entry in self.entries.values_mut() {
            let b = entry.binding;
            if entry.handle.is_some() {
                summary.attempted += 1;
                summary.registered += 1;
                continue;
            }
            if !taken.insert((b.key, b.modifier)) {
                warn!(id = b.id, key = %b.key, modifier = %b.modifier, "hotkey_duplicate_skipped");
                continue;
            }
            summary.attempted += 1;
            match self.api.register(b.key, b.modifier, b.id) {
                Ok(handle) => {
                    debug!(id = b.id, key = %b.key, modifier = %b.modifier, "hotkey_registered");
                    entry.handle = Some(handle);
                    summary.registered += 1;
                }
                Err(e) => {
                    taken.remove(&(b.key, b.modifier));
                    warn!(id = b.id, key = %b.key, modifier = %b.modifier, error = %e, "hotkey_register_failed");
                }
            }
        }

        self.state = RouterState::Active;
        summary
    }

    /// Run the action bound to `id`. Unknown ids and inactive bindings are
    /// ignored. Returns true if an action ran.
    pub fn dispatch(&self, id: HotkeyId) -> bool {
        match self.entries.get(&id) {
            Some(entry) if entry.handle.is_some() => {
                trace!(id, "hotkey_dispatch");
                (entry.action)();
                true
            }
            _ => {
                trace!(id, "hotkey_ignored");
                false
            }
        }
    }

    /// Release every OS registration. Bindings are kept, so a later
    /// [`HotkeyRouter::register_all`] restores them. Safe to call repeatedly.
    pub fn unbind_all(&mut self) -> usize {
        let released: Vec<(HotkeyBinding, RegistrationHandle)> = self
            .entries
            .values_mut()
            .filter_map(|e| e.handle.take().map(|h| (e.binding, h)))
            .collect();
        let count = released.len();
        for (binding, handle) in released {
            self.release(binding, handle);
        }
        self.state = RouterState::Unregistered;
        if count > 0 {
            debug!(count, "hotkeys_released");
        }
        count
    }

    /// Bindings currently active, in id order.
    pub fn active(&self) -> Vec<HotkeyBinding> {
        self.entries
            .values()
            .filter(|e| e.handle.is_some())
            .map(|e| e.binding)
            .collect()
    }

    fn release(&self, binding: HotkeyBinding, handle: RegistrationHandle) {
        if let Err(e) = self.api.unregister(handle) {
            warn!(id = binding.id, error = %e, "hotkey_unregister_failed");
        }
    }
}

impl Drop for HotkeyRouter {
    fn drop(&mut self) {
        self.unbind_all();
    }
}
