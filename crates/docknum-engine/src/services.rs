use std::sync::Arc;

use crate::deps::{AppService, DockSource, HotkeyApi};

/// Groups the engine's external capabilities so construction sites stay
/// explicit about what the engine depends on.
pub struct Services {
    /// Global hotkey registration.
    pub hotkeys: Box<dyn HotkeyApi>,
    /// Dock contents.
    pub dock: Arc<dyn DockSource>,
    /// Application lookup, launch and activation.
    pub apps: Arc<dyn AppService>,
}
