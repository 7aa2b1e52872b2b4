//! Placement of the system file manager.
//!
//! Finder is always skipped when slots are walked in Dock order. It can
//! optionally be pinned to a fixed slot instead.

use tracing::warn;

use crate::Slot;

/// Display name of the excluded file-manager application.
pub const FINDER_APP: &str = "Finder";

/// Where (if anywhere) Finder is bound.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FinderPlacement {
    /// Finder gets no slot.
    #[default]
    Ignore,
    /// Finder is pinned to this slot, which is withheld from the Dock walk.
    Slot(Slot),
}

impl FinderPlacement {
    /// Parse a Finder directive: `ignore` or a slot number 1..10. Anything
    /// else is treated as `ignore`.
    pub fn parse_lossy(s: &str) -> Self {
        let s = s.trim();
        if s.eq_ignore_ascii_case("ignore") {
            return Self::Ignore;
        }
        match Slot::parse(s) {
            Ok(slot) => Self::Slot(slot),
            Err(e) => {
                warn!(directive = s, error = %e, "finder_directive_ignored");
                Self::Ignore
            }
        }
    }

    /// The pinned slot, if any.
    pub fn slot(self) -> Option<Slot> {
        match self {
            Self::Ignore => None,
            Self::Slot(slot) => Some(slot),
        }
    }
}
