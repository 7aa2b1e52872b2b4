//! Slot Cache: the current slot → application mapping.
//!
//! The mapping is rebuilt wholesale on every refresh and published with a
//! single `Arc` swap, so readers see either the old map or the new one, never
//! a mix. Descriptors carry an optional handle to a running instance which is
//! checked for liveness at the point of use and cleared when stale.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use config::{FINDER_APP, FinderPlacement, ReservedSlots, Settings, Slot};
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::deps::{AppQuery, AppService, DockSource, RunningApp};

/// Cached resolution data for one slot's application.
#[derive(Debug)]
pub struct AppDescriptor {
    name: String,
    path: Option<PathBuf>,
    identifier: Option<String>,
    found_running: bool,
    running: Mutex<Option<RunningApp>>,
}

impl AppDescriptor {
    /// Build a descriptor from resolved parts.
    pub fn new(
        name: impl Into<String>,
        path: Option<PathBuf>,
        running: Option<RunningApp>,
    ) -> Self {
        let identifier = running.as_ref().and_then(|r| r.identifier.clone());
        Self {
            name: name.into(),
            path,
            identifier,
            found_running: running.is_some(),
            running: Mutex::new(running),
        }
    }

    /// Resolve `name` through `apps`.
    fn resolve(name: &str, apps: &dyn AppService) -> Self {
        let path = apps.resolve_path(name);
        let running = apps.find_running(AppQuery::Name(name));
        Self::new(name, path, running)
    }

    /// Display name as reported by the Dock.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Launchable artifact found at refresh time.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Stable identifier recorded from the running instance at refresh time.
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// The cached running instance, if any. Not checked for liveness.
    pub fn running(&self) -> Option<RunningApp> {
        self.running.lock().clone()
    }

    /// Replace the cached running instance.
    pub fn set_running(&self, app: Option<RunningApp>) {
        *self.running.lock() = app;
    }

    /// True if a running instance was found at refresh time. Unaffected by
    /// later liveness checks.
    pub fn found_running(&self) -> bool {
        self.found_running
    }

    /// True when refresh found neither a path nor a running instance.
    pub fn is_unresolved(&self) -> bool {
        self.path.is_none() && !self.found_running
    }
}

/// An immutable slot → descriptor mapping.
#[derive(Debug, Default)]
pub struct SlotMap {
    slots: BTreeMap<Slot, Arc<AppDescriptor>>,
}

impl SlotMap {
    /// Descriptor assigned to `slot`.
    pub fn get(&self, slot: Slot) -> Option<&Arc<AppDescriptor>> {
        self.slots.get(&slot)
    }

    /// Assigned slots in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (Slot, &Arc<AppDescriptor>)> {
        self.slots.iter().map(|(s, d)| (*s, d))
    }

    /// (slot, name) pairs in ascending slot order.
    pub fn assignments(&self) -> Vec<(Slot, String)> {
        self.iter().map(|(s, d)| (s, d.name().to_string())).collect()
    }

    /// Number of assigned slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when nothing is assigned.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Assign Dock names to slots.
///
/// Names are walked in order with a cursor starting at slot 1 that skips
/// `reserved`. Finder never takes part in the walk. When `finder` pins it to a
/// slot and it appears in `names`, it is placed there afterwards.
pub fn assign_slots(
    names: &[String],
    reserved: &ReservedSlots,
    finder: FinderPlacement,
) -> Vec<(Slot, String)> {
    let mut out = Vec::new();
    let mut cursor = Slot::new(Slot::MIN);
    for name in names.iter().filter(|n| n.as_str() != FINDER_APP) {
        let free = loop {
            match cursor {
                Some(s) if reserved.contains(s) => cursor = s.next(),
                other => break other,
            }
        };
        let Some(slot) = free else {
            break;
        };
        out.push((slot, name.clone()));
        cursor = slot.next();
    }

    if let Some(slot) = finder.slot()
        && names.iter().any(|n| n == FINDER_APP)
    {
        out.push((slot, FINDER_APP.to_string()));
    }
    out
}

/// Holds the current [`SlotMap`].
#[derive(Debug, Default)]
pub struct SlotCache {
    current: Mutex<Arc<SlotMap>>,
}

impl SlotCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the mapping from the Dock and publish it.
    ///
    /// An empty Dock listing yields an empty mapping; the previous mapping is
    /// discarded regardless.
    pub fn refresh(
        &self,
        dock: &dyn DockSource,
        apps: &dyn AppService,
        settings: &Settings,
    ) -> Arc<SlotMap> {
        let names = dock.dock_apps();
        let assigned = assign_slots(&names, &settings.reserved_slots(), settings.finder);
        let slots = assigned
            .into_iter()
            .map(|(slot, name)| {
                let desc = AppDescriptor::resolve(&name, apps);
                debug!(
                    slot = slot.get(),
                    app = desc.name(),
                    path = ?desc.path(),
                    running = desc.running().is_some(),
                    "slot_resolved"
                );
                (slot, Arc::new(desc))
            })
            .collect();
        let map = Arc::new(SlotMap { slots });
        info!(dock = names.len(), assigned = map.len(), "slot_cache_refreshed");
        *self.current.lock() = map.clone();
        map
    }

    /// The descriptor assigned to `slot`, if any.
    pub fn lookup(&self, slot: Slot) -> Option<Arc<AppDescriptor>> {
        self.current.lock().get(slot).cloned()
    }

    /// The current mapping.
    pub fn snapshot(&self) -> Arc<SlotMap> {
        self.current.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::test_support::{MockApps, MockDock};

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn slot(n: u8) -> Slot {
        Slot::new(n).expect("valid slot")
    }

    fn pairs(list: &[(u8, &str)]) -> Vec<(Slot, String)> {
        list.iter().map(|(n, s)| (slot(*n), s.to_string())).collect()
    }

    #[test]
    fn finder_is_skipped_by_default() {
        let got = assign_slots(
            &names(&["Safari", "Mail", "Finder", "Notes"]),
            &ReservedSlots::default(),
            FinderPlacement::Ignore,
        );
        assert_eq!(got, pairs(&[(1, "Safari"), (2, "Mail"), (3, "Notes")]));
    }

    #[test]
    fn reserved_slots_are_skipped() {
        let reserved: ReservedSlots = [slot(2), slot(3)].into_iter().collect();
        let got = assign_slots(
            &names(&["A", "B", "C"]),
            &reserved,
            FinderPlacement::Ignore,
        );
        assert_eq!(got, pairs(&[(1, "A"), (4, "B"), (5, "C")]));
    }

    #[test]
    fn pinned_finder_lands_after_walk() {
        let reserved: ReservedSlots = [slot(1)].into_iter().collect();
        let got = assign_slots(
            &names(&["Finder", "Safari"]),
            &reserved,
            FinderPlacement::Slot(slot(1)),
        );
        assert_eq!(got, pairs(&[(2, "Safari"), (1, "Finder")]));
    }

    #[test]
    fn pinned_finder_absent_from_dock_is_not_assigned() {
        let reserved: ReservedSlots = [slot(10)].into_iter().collect();
        let got = assign_slots(
            &names(&["Safari"]),
            &reserved,
            FinderPlacement::Slot(slot(10)),
        );
        assert_eq!(got, pairs(&[(1, "Safari")]));
    }

    #[test]
    fn walk_stops_at_ten() {
        let many: Vec<String> = (0..15).map(|i| format!("App{i}")).collect();
        let got = assign_slots(&many, &ReservedSlots::default(), FinderPlacement::Ignore);
        assert_eq!(got.len(), Slot::COUNT);
        assert_eq!(got.last().map(|(s, n)| (s.get(), n.as_str())), Some((10, "App9")));
    }

    #[test]
    fn refresh_resolves_and_replaces() {
        let dock = MockDock::new(&["Safari", "Ghost"]);
        let apps = MockApps::new();
        apps.install("Safari");
        apps.start("Safari", 42);
        let cache = SlotCache::new();

        let map = cache.refresh(&dock, &apps, &Settings::default());
        let safari = map.get(slot(1)).expect("safari assigned");
        assert!(safari.path().is_some());
        assert_eq!(safari.running().map(|r| r.pid), Some(42));
        assert_eq!(safari.identifier(), Some("com.example.Safari"));
        let ghost = cache.lookup(slot(2)).expect("ghost occupies slot");
        assert!(ghost.is_unresolved());
        assert!(cache.lookup(slot(3)).is_none());

        dock.set(&[]);
        let map = cache.refresh(&dock, &apps, &Settings::default());
        assert!(map.is_empty());
        assert!(cache.lookup(slot(1)).is_none());
    }

    #[test]
    fn resolution_survives_stale_handle() {
        let dock = MockDock::new(&["Preview"]);
        let apps = MockApps::new();
        apps.start("Preview", 7);
        let cache = SlotCache::new();
        cache.refresh(&dock, &apps, &Settings::default());

        let preview = cache.lookup(slot(1)).expect("preview assigned");
        assert!(preview.path().is_none());
        preview.set_running(None);
        assert!(preview.running().is_none());
        assert!(preview.found_running());
        assert!(!preview.is_unresolved());
    }

    #[test]
    fn refresh_is_idempotent() {
        let dock = MockDock::new(&["Safari", "Mail", "Finder", "Notes"]);
        let apps = MockApps::new();
        apps.install("Mail");
        let cache = SlotCache::new();
        let settings = Settings::resolve(None, Some("9"), Some("2:Notes"));
        let first = cache.refresh(&dock, &apps, &settings);
        let second = cache.refresh(&dock, &apps, &settings);
        assert_eq!(first.assignments(), second.assignments());
        for (s, d) in first.iter() {
            let other = second.get(s).expect("same slots");
            assert_eq!(d.path(), other.path());
            assert_eq!(d.identifier(), other.identifier());
        }
    }

    fn reserved_strategy() -> impl Strategy<Value = ReservedSlots> {
        proptest::collection::btree_set(1u8..=10, 0..4)
            .prop_map(|set| set.into_iter().filter_map(Slot::new).collect())
    }

    fn names_strategy() -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec(
            prop_oneof![Just("Finder".to_string()), "[A-Z][a-z]{1,6}"],
            0..16,
        )
    }

    proptest! {
        #[test]
        fn walk_respects_reservations_and_order(
            list in names_strategy(),
            reserved in reserved_strategy(),
        ) {
            let got = assign_slots(&list, &reserved, FinderPlacement::Ignore);

            for (s, _) in &got {
                prop_assert!(!reserved.contains(*s));
            }
            for w in got.windows(2) {
                prop_assert!(w[0].0 < w[1].0);
            }

            let expected: Vec<&String> = list.iter().filter(|n| *n != "Finder").collect();
            let free = Slot::COUNT - reserved.len();
            prop_assert_eq!(got.len(), expected.len().min(free));
            for ((_, name), want) in got.iter().zip(expected) {
                prop_assert_eq!(name, want);
            }
        }
    }
}
