//! Combo shortcuts: one key press, several applications.

use std::fmt;

use crate::{Error, KeyCode, Result, Slot};

/// The key that fires a combo.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ComboTrigger {
    /// A digit key. The combo takes over that slot.
    Slot(Slot),
    /// A letter key, bound in addition to the slots.
    Letter(KeyCode),
}

impl ComboTrigger {
    /// The physical key carrying the combo hotkey.
    pub fn key(self) -> KeyCode {
        match self {
            Self::Slot(slot) => KeyCode::for_slot(slot),
            Self::Letter(key) => key,
        }
    }
}

impl fmt::Display for ComboTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key().label())
    }
}

/// A parsed `trigger:name1,name2,...` combo specification.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComboSpec {
    /// The key that fires the combo.
    pub trigger: ComboTrigger,
    /// Applications to launch or activate, in order. Never empty.
    pub apps: Vec<String>,
}

impl ComboSpec {
    /// Parse a combo specification.
    ///
    /// The trigger is everything before the first `:`, trimmed, and must be a
    /// single ASCII digit (`0` meaning slot 10) or a single ASCII letter. The
    /// remainder is split on `,`; names are trimmed and empty names dropped.
    pub fn parse(spec: &str) -> Result<Self> {
        let invalid = |reason| Error::InvalidCombo {
            spec: spec.to_string(),
            reason,
        };
        let (trigger, names) = spec.split_once(':').ok_or_else(|| invalid("missing ':'"))?;

        let mut chars = trigger.trim().chars();
        let (Some(c), None) = (chars.next(), chars.next()) else {
            return Err(invalid("trigger must be a single digit or letter"));
        };
        let trigger = if c.is_ascii_digit() {
            Slot::from_digit(c).map(ComboTrigger::Slot)
        } else {
            KeyCode::from_letter(c).map(ComboTrigger::Letter)
        }
        .ok_or_else(|| invalid("trigger must be a single digit or letter"))?;

        let apps: Vec<String> = names
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect();
        if apps.is_empty() {
            return Err(invalid("no application names"));
        }
        Ok(Self { trigger, apps })
    }

    /// The slot this combo occupies, when triggered by a digit.
    pub fn target_slot(&self) -> Option<Slot> {
        match self.trigger {
            ComboTrigger::Slot(slot) => Some(slot),
            ComboTrigger::Letter(_) => None,
        }
    }
}
