//! Resolved, immutable settings.

use std::{collections::BTreeSet, env, time::Duration};

use tracing::{debug, warn};

use crate::{ComboSpec, FinderPlacement, ModifierKey, Slot};

/// Delay before a cold launch fires, absorbing key chatter and autorepeat.
pub const DEFAULT_LAUNCH_DELAY_MS: u64 = 3;
/// Spacing between successive combo requests.
pub const DEFAULT_STAGGER_MS: u64 = 50;

/// Environment variable overriding the launch delay.
const LAUNCH_DELAY_ENV: &str = "DOCKNUM_LAUNCH_DELAY_MS";
/// Environment variable overriding the combo stagger.
const STAGGER_ENV: &str = "DOCKNUM_STAGGER_MS";

/// Optional timing overrides, normally read from the environment.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TimingOverrides {
    /// Launch delay in milliseconds.
    pub launch_delay_ms: Option<u64>,
    /// Combo stagger in milliseconds.
    pub stagger_ms: Option<u64>,
}

impl TimingOverrides {
    /// Read `DOCKNUM_LAUNCH_DELAY_MS` and `DOCKNUM_STAGGER_MS`.
    pub fn from_env() -> Self {
        Self::parse(
            env::var(LAUNCH_DELAY_ENV).ok().as_deref(),
            env::var(STAGGER_ENV).ok().as_deref(),
        )
    }

    /// Parse raw override values; unparsable values are ignored with a warning.
    pub fn parse(launch_delay_ms: Option<&str>, stagger_ms: Option<&str>) -> Self {
        fn millis(name: &str, raw: Option<&str>) -> Option<u64> {
            let raw = raw?;
            match raw.trim().parse::<u64>() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!(var = name, value = raw, "timing_override_ignored");
                    None
                }
            }
        }
        Self {
            launch_delay_ms: millis(LAUNCH_DELAY_ENV, launch_delay_ms),
            stagger_ms: millis(STAGGER_ENV, stagger_ms),
        }
    }
}

/// Slots withheld from the Dock walk.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReservedSlots(BTreeSet<Slot>);

impl ReservedSlots {
    /// True if `slot` must not be auto-assigned.
    pub fn contains(&self, slot: Slot) -> bool {
        self.0.contains(&slot)
    }

    /// Reserved slots in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = Slot> + '_ {
        self.0.iter().copied()
    }

    /// Number of reserved slots.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing is reserved.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<Slot> for ReservedSlots {
    fn from_iter<I: IntoIterator<Item = Slot>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Everything the engine needs to know about the user's choices.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Modifier held with every hotkey.
    pub modifier: ModifierKey,
    /// Finder handling.
    pub finder: FinderPlacement,
    /// Optional combo shortcut.
    pub combo: Option<ComboSpec>,
    /// Delay before a cold launch is performed.
    pub launch_delay: Duration,
    /// Spacing between combo requests.
    pub stagger: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            modifier: ModifierKey::default(),
            finder: FinderPlacement::default(),
            combo: None,
            launch_delay: Duration::from_millis(DEFAULT_LAUNCH_DELAY_MS),
            stagger: Duration::from_millis(DEFAULT_STAGGER_MS),
        }
    }
}

impl Settings {
    /// Resolve settings from the raw positional inputs. Never fails.
    ///
    /// - `modifier`: see [`ModifierKey::parse_lossy`]; defaults to Control.
    /// - `finder`: see [`FinderPlacement::parse_lossy`]; defaults to ignore.
    /// - `combo`: see [`ComboSpec::parse`]; malformed specs mean no combo.
    ///
    /// If Finder is pinned to the slot the combo occupies, the combo keeps the
    /// slot and Finder is ignored.
    pub fn resolve(modifier: Option<&str>, finder: Option<&str>, combo: Option<&str>) -> Self {
        let modifier = modifier.map(ModifierKey::parse_lossy).unwrap_or_default();
        let mut finder = finder.map(FinderPlacement::parse_lossy).unwrap_or_default();
        let combo = combo
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| match ComboSpec::parse(s) {
                Ok(c) => Some(c),
                Err(e) => {
                    warn!(error = %e, "combo_spec_ignored");
                    None
                }
            });

        if let (Some(pinned), Some(c)) = (finder.slot(), combo.as_ref())
            && c.target_slot() == Some(pinned)
        {
            warn!(slot = %pinned, "finder_slot_taken_by_combo");
            finder = FinderPlacement::Ignore;
        }

        let settings = Self {
            modifier,
            finder,
            combo,
            ..Self::default()
        };
        debug!(?settings, "settings_resolved");
        settings
    }

    /// Apply timing overrides.
    pub fn with_timing(mut self, overrides: TimingOverrides) -> Self {
        if let Some(ms) = overrides.launch_delay_ms {
            self.launch_delay = Duration::from_millis(ms);
        }
        if let Some(ms) = overrides.stagger_ms {
            self.stagger = Duration::from_millis(ms);
        }
        self
    }

    /// The slot taken by a digit-triggered combo.
    pub fn combo_slot(&self) -> Option<Slot> {
        self.combo.as_ref().and_then(ComboSpec::target_slot)
    }

    /// Slots excluded from auto-assignment: the combo's slot and Finder's.
    pub fn reserved_slots(&self) -> ReservedSlots {
        self.combo_slot().into_iter().chain(self.finder.slot()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ComboTrigger, KeyCode};

    fn slot(n: u8) -> Slot {
        Slot::new(n).expect("valid slot")
    }

    #[test]
    fn defaults() {
        let s = Settings::resolve(None, None, None);
        assert_eq!(s.modifier, ModifierKey::Control);
        assert_eq!(s.finder, FinderPlacement::Ignore);
        assert!(s.combo.is_none());
        assert!(s.reserved_slots().is_empty());
        assert_eq!(s.launch_delay, Duration::from_millis(3));
        assert_eq!(s.stagger, Duration::from_millis(50));
    }

    #[test]
    fn combo_and_finder_are_reserved() {
        let s = Settings::resolve(Some("cmd"), Some("10"), Some("5:Notes,Reminders"));
        assert_eq!(s.modifier, ModifierKey::Command);
        let reserved: Vec<Slot> = s.reserved_slots().iter().collect();
        assert_eq!(reserved, vec![slot(5), slot(10)]);
    }

    #[test]
    fn letter_combo_reserves_nothing() {
        let s = Settings::resolve(None, Some("ignore"), Some("e:Notes"));
        assert_eq!(
            s.combo.as_ref().map(|c| c.trigger),
            Some(ComboTrigger::Letter(KeyCode::E))
        );
        assert!(s.reserved_slots().is_empty());
    }

    #[test]
    fn malformed_combo_degrades() {
        let s = Settings::resolve(None, None, Some("notes and reminders"));
        assert!(s.combo.is_none());
        let s = Settings::resolve(None, None, Some("   "));
        assert!(s.combo.is_none());
    }

    #[test]
    fn combo_wins_shared_slot() {
        let s = Settings::resolve(None, Some("3"), Some("3:Mail"));
        assert_eq!(s.finder, FinderPlacement::Ignore);
        assert_eq!(s.combo_slot(), Some(slot(3)));
        assert_eq!(s.reserved_slots().len(), 1);
    }

    #[test]
    fn timing_overrides() {
        let t = TimingOverrides::parse(Some("10"), Some("fast"));
        assert_eq!(t.launch_delay_ms, Some(10));
        assert_eq!(t.stagger_ms, None);
        let s = Settings::default().with_timing(t);
        assert_eq!(s.launch_delay, Duration::from_millis(10));
        assert_eq!(s.stagger, Duration::from_millis(DEFAULT_STAGGER_MS));
    }
}
