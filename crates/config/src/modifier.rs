//! The single modifier held together with a slot key.

use std::fmt;

use tracing::warn;

/// Modifier key used for every docknum hotkey.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ModifierKey {
    /// Control (the default).
    #[default]
    Control,
    /// Command.
    Command,
    /// Option / Alt.
    Option,
}

impl ModifierKey {
    /// Parse a modifier name. Accepts `control`/`ctrl`, `command`/`cmd` and
    /// `option`/`opt`/`alt`, case-insensitive. Anything else yields Control.
    pub fn parse_lossy(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "control" | "ctrl" => Self::Control,
            "command" | "cmd" => Self::Command,
            "option" | "opt" | "alt" => Self::Option,
            other => {
                warn!(modifier = other, "unknown_modifier_defaulting_to_control");
                Self::Control
            }
        }
    }

    /// Short name used in status lines ("Ctrl", "Cmd", "Option").
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Control => "Ctrl",
            Self::Command => "Cmd",
            Self::Option => "Option",
        }
    }
}

impl fmt::Display for ModifierKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
