//! Human-readable slot mapping, printed after each refresh.

use std::fmt;

use config::{ComboSpec, ModifierKey, Settings, Slot};

use crate::slot_cache::{AppDescriptor, SlotMap};

/// How a slot's application was resolved.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SlotStatus {
    /// A running instance was found.
    Running,
    /// Not running, but a launchable artifact was found.
    Launchable,
    /// Neither; pressing the hotkey reports "not found".
    Unresolved,
}

impl SlotStatus {
    fn of(desc: &AppDescriptor) -> Self {
        if desc.found_running() {
            Self::Running
        } else if desc.path().is_some() {
            Self::Launchable
        } else {
            Self::Unresolved
        }
    }

    /// Status marker used in the console listing.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Running => "✅",
            Self::Launchable => "📦",
            Self::Unresolved => "⚠️",
        }
    }
}

/// One slot line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotRow {
    /// Slot number.
    pub slot: Slot,
    /// Application name.
    pub app: String,
    /// Resolution status.
    pub status: SlotStatus,
}

/// A snapshot of the slot mapping and combo, ready for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MappingReport {
    /// Modifier held with every hotkey.
    pub modifier: ModifierKey,
    /// Assigned slots in ascending order.
    pub rows: Vec<SlotRow>,
    /// The configured combo, if any.
    pub combo: Option<ComboSpec>,
}

impl MappingReport {
    /// Describe `map` under `settings`.
    pub fn new(map: &SlotMap, settings: &Settings) -> Self {
        Self {
            modifier: settings.modifier,
            rows: map
                .iter()
                .map(|(slot, desc)| SlotRow {
                    slot,
                    app: desc.name().to_string(),
                    status: SlotStatus::of(desc),
                })
                .collect(),
            combo: settings.combo.clone(),
        }
    }
}

impl fmt::Display for MappingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.modifier.display_name();
        if self.rows.is_empty() {
            writeln!(f, "  No Dock applications assigned")?;
        }
        for row in &self.rows {
            writeln!(
                f,
                "  {} {m}+{} → {}",
                row.status.glyph(),
                row.slot.key_label(),
                row.app
            )?;
        }
        if let Some(combo) = &self.combo {
            writeln!(
                f,
                "  🔗 {m}+{} → {} (combo)",
                combo.trigger,
                combo.apps.join(", ")
            )?;
        }
        Ok(())
    }
}
