//! Carbon-backed global hotkeys via `global-hotkey`.

use std::{collections::HashMap, sync::Arc};

use config::{KeyCode, ModifierKey};
use global_hotkey::{
    GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState,
    hotkey::{Code, HotKey, Modifiers},
};
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::{Error, Result, keymap};

/// A live registration, keyed by the OS hotkey id.
struct Registered {
    mods: Modifiers,
    code: Code,
    id: u32,
}

/// Owns the process's global hotkeys and maps OS ids back to caller ids.
///
/// Must be created and used on the main thread, where the event loop runs.
pub struct HotkeyManager {
    manager: GlobalHotKeyManager,
    routes: Arc<Mutex<HashMap<u32, Registered>>>,
}

impl HotkeyManager {
    /// Create the OS hotkey manager.
    pub fn new() -> Result<Self> {
        let manager = GlobalHotKeyManager::new().map_err(|e| Error::Manager(e.to_string()))?;
        Ok(Self {
            manager,
            routes: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// Register `modifier`+`key`, reporting presses as `id`. Returns the OS
    /// registration id, which [`HotkeyManager::unregister`] takes.
    pub fn register(&self, key: KeyCode, modifier: ModifierKey, id: u32) -> Result<u32> {
        let mods = keymap::modifiers(modifier);
        let code = keymap::code(key);
        let hotkey = HotKey::new(Some(mods), code);
        let os_id = hotkey.id();
        self.manager.register(hotkey).map_err(|e| Error::Register {
            chord: format!("{}+{}", modifier.display_name(), key),
            reason: e.to_string(),
        })?;
        self.routes.lock().insert(os_id, Registered { mods, code, id });
        debug!(id, os_id, key = %key, modifier = %modifier, "os_hotkey_registered");
        Ok(os_id)
    }

    /// Release a registration made by [`HotkeyManager::register`].
    pub fn unregister(&self, os_id: u32) -> Result<()> {
        let reg = self.routes.lock().remove(&os_id).ok_or(Error::InvalidId(os_id))?;
        let hotkey = HotKey::new(Some(reg.mods), reg.code);
        if let Err(e) = self.manager.unregister(hotkey) {
            warn!(id = reg.id, os_id, error = %e, "os_hotkey_unregister_failed");
        }
        trace!(id = reg.id, os_id, "os_hotkey_unregistered");
        Ok(())
    }

    /// Deliver key-down presses of registered hotkeys to `on_press` with the
    /// caller's id. Replaces any earlier handler. Runs on the OS event thread.
    pub fn set_handler<F>(&self, on_press: F)
    where
        F: Fn(u32) + Send + Sync + 'static,
    {
        let routes = self.routes.clone();
        GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
            if event.state != HotKeyState::Pressed {
                return;
            }
            let id = routes.lock().get(&event.id).map(|r| r.id);
            match id {
                Some(id) => on_press(id),
                None => trace!(os_id = event.id, "os_hotkey_unrouted"),
            }
        }));
    }
}

impl Drop for HotkeyManager {
    fn drop(&mut self) {
        GlobalHotKeyEvent::set_event_handler(None::<fn(GlobalHotKeyEvent)>);
    }
}
