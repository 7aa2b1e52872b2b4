use std::{sync::Arc, time::Duration};

use config::{KeyCode, ModifierKey, Settings, Slot, TimingOverrides};
use docknum_engine::{
    COMBO_HOTKEY_ID, Engine, LaunchOutcome, Scheduler, Services, slot_hotkey_id,
    test_support::{AppOp, MockApps, MockDock, MockHotkeyApi},
};
use tokio::time;

const DELAY: Duration = Duration::from_millis(3);
const STAGGER: Duration = Duration::from_millis(50);

fn slot(n: u8) -> Slot {
    Slot::new(n).expect("valid slot")
}

fn settings(modifier: Option<&str>, finder: Option<&str>, combo: Option<&str>) -> Settings {
    Settings::resolve(modifier, finder, combo).with_timing(TimingOverrides {
        launch_delay_ms: Some(DELAY.as_millis() as u64),
        stagger_ms: Some(STAGGER.as_millis() as u64),
    })
}

struct Harness {
    engine: Engine,
    hotkeys: MockHotkeyApi,
    dock: Arc<MockDock>,
    apps: MockApps,
}

fn harness(dock: &[&str], settings: Settings) -> Harness {
    let hotkeys = MockHotkeyApi::new();
    let dock = Arc::new(MockDock::new(dock));
    let apps = MockApps::new();
    let engine = Engine::new(
        settings,
        Services {
            hotkeys: Box::new(hotkeys.clone()),
            dock: dock.clone(),
            apps: Arc::new(apps.clone()),
        },
        Scheduler::current(),
    );
    Harness {
        engine,
        hotkeys,
        dock,
        apps,
    }
}

fn assigned(engine: &Engine) -> Vec<(u8, String)> {
    Slot::all()
        .filter_map(|s| engine.lookup(s).map(|d| (s.get(), d.name().to_string())))
        .collect()
}

fn pairs(list: &[(u8, &str)]) -> Vec<(u8, String)> {
    list.iter().map(|(n, s)| (*n, s.to_string())).collect()
}

#[tokio::test(start_paused = true)]
async fn finder_is_left_out_of_the_walk() {
    let h = harness(&["Safari", "Mail", "Finder", "Notes"], settings(None, None, None));
    h.engine.refresh();
    assert_eq!(
        assigned(&h.engine),
        pairs(&[(1, "Safari"), (2, "Mail"), (3, "Notes")])
    );
}

#[tokio::test(start_paused = true)]
async fn digit_combo_reserves_its_slot() {
    let mut h = harness(
        &["Safari", "Mail", "Finder", "Notes"],
        settings(None, None, Some("5:Notes,Reminders")),
    );
    h.apps.install("Notes");
    let reminders = h.apps.install("Reminders");
    h.apps.start("Notes", 30);
    h.engine.refresh();
    assert_eq!(
        assigned(&h.engine),
        pairs(&[(1, "Safari"), (2, "Mail"), (3, "Notes")])
    );

    let summary = h.engine.install_hotkeys();
    assert_eq!(summary.registered, 10);
    let combo = h
        .hotkeys
        .active()
        .into_iter()
        .find(|r| r.key == KeyCode::Digit5)
        .expect("slot 5 key registered");
    assert_eq!(combo.id, COMBO_HOTKEY_ID);
    assert!(!h.engine.dispatch(slot_hotkey_id(slot(5))));

    assert!(h.engine.dispatch(COMBO_HOTKEY_ID));
    time::sleep(STAGGER * 3).await;
    assert_eq!(
        h.apps.ops(),
        vec![AppOp::Activate("Notes".into()), AppOp::Launch(reminders)]
    );
}

#[tokio::test(start_paused = true)]
async fn pinned_finder_takes_its_slot() {
    let h = harness(&["Finder", "Safari", "Mail"], settings(None, Some("2"), None));
    h.engine.refresh();
    assert_eq!(
        assigned(&h.engine),
        pairs(&[(1, "Safari"), (2, "Finder"), (3, "Mail")])
    );
}

#[tokio::test(start_paused = true)]
async fn removed_bundle_falls_through_to_not_found() {
    let h = harness(&["Safari"], settings(None, None, None));
    h.apps.install("Safari");
    h.engine.refresh();
    h.apps.uninstall("Safari");

    assert_eq!(h.engine.request(slot(1)), LaunchOutcome::NotFound);
    time::sleep(DELAY * 5).await;
    assert!(h.apps.ops().is_empty());
}

#[tokio::test(start_paused = true)]
async fn second_request_supersedes_first() {
    let h = harness(&["Safari"], settings(None, None, None));
    let path = h.apps.install("Safari");
    h.engine.refresh();

    let LaunchOutcome::Scheduled(first) = h.engine.request(slot(1)) else {
        panic!("expected a scheduled launch");
    };
    time::sleep(Duration::from_millis(1)).await;
    let second_at = time::Instant::now();
    let LaunchOutcome::Scheduled(second) = h.engine.request(slot(1)) else {
        panic!("expected a scheduled launch");
    };
    assert!(second > first);

    time::sleep(DELAY * 5).await;
    let calls = h.apps.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].op, AppOp::Launch(path));
    assert_eq!(calls[0].at, second_at + DELAY);
}

#[tokio::test(start_paused = true)]
async fn rapid_requests_launch_once() {
    for n in 1..=8 {
        let h = harness(&["Mail"], settings(None, None, None));
        let path = h.apps.install("Mail");
        h.engine.refresh();

        let mut last = None;
        for _ in 0..n {
            last = Some((time::Instant::now(), h.engine.request(slot(1))));
            time::sleep(Duration::from_millis(1)).await;
        }
        time::sleep(DELAY * 5).await;

        let Some((last_at, LaunchOutcome::Scheduled(_))) = last else {
            panic!("expected a scheduled launch");
        };
        assert_eq!(h.apps.launches(), vec![path], "{n} presses");
        let at: Vec<_> = h.apps.calls().iter().map(|c| c.at).collect();
        assert_eq!(at, vec![last_at + DELAY], "{n} presses");
    }
}

#[tokio::test(start_paused = true)]
async fn running_app_is_activated_immediately() {
    let h = harness(&["Safari"], settings(None, None, None));
    h.apps.install("Safari");
    h.apps.start("Safari", 4);
    h.engine.refresh();

    for _ in 0..3 {
        assert_eq!(h.engine.request(slot(1)), LaunchOutcome::Activated);
    }
    time::sleep(DELAY * 5).await;
    assert!(h.apps.launches().is_empty());
    assert_eq!(h.apps.ops().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn combo_requests_are_ordered_and_staggered() {
    let mut h = harness(&[], settings(None, None, Some("e:A,B,C")));
    for name in ["A", "B", "C"] {
        h.apps.install(name);
    }
    h.engine.install_hotkeys();
    assert!(h.engine.dispatch(COMBO_HOTKEY_ID));
    time::sleep(STAGGER * 4).await;

    let calls = h.apps.calls();
    let names: Vec<String> = calls
        .iter()
        .map(|c| match &c.op {
            AppOp::Launch(p) => p.display().to_string(),
            AppOp::Activate(n) => n.clone(),
        })
        .collect();
    assert_eq!(
        names,
        vec![
            "/Applications/A.app",
            "/Applications/B.app",
            "/Applications/C.app"
        ]
    );
    for w in calls.windows(2) {
        assert!(w[1].at.duration_since(w[0].at) >= STAGGER);
    }
}

#[tokio::test(start_paused = true)]
async fn letter_combo_adds_a_binding() {
    let mut h = harness(&[], settings(Some("option"), None, Some("e:Notes")));
    let summary = h.engine.install_hotkeys();
    assert_eq!(summary.attempted, 11);
    assert_eq!(summary.registered, 11);
    let active = h.hotkeys.active();
    let combo = active
        .iter()
        .find(|r| r.id == COMBO_HOTKEY_ID)
        .expect("combo registered");
    assert_eq!(combo.key, KeyCode::E);
    assert!(active.iter().all(|r| r.modifier == ModifierKey::Option));
}

#[tokio::test(start_paused = true)]
async fn failed_registrations_are_isolated() {
    let mut h = harness(&["A", "B", "C"], settings(None, None, None));
    h.apps.install("A");
    h.apps.install("C");
    h.engine.refresh();
    h.hotkeys.fail_on(KeyCode::Digit2);

    let summary = h.engine.install_hotkeys();
    assert_eq!(summary.attempted, 10);
    assert_eq!(summary.registered, 9);
    assert!(!h.engine.dispatch(2));
    assert!(h.engine.dispatch(3));
    assert!(!h.engine.dispatch(1234));
    time::sleep(DELAY * 5).await;
    assert_eq!(h.apps.launches().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn all_registrations_failing_is_not_fatal() {
    let mut h = harness(&["A"], settings(None, None, None));
    for key in KeyCode::ALL.iter().copied().filter(|k| k.is_digit()) {
        h.hotkeys.fail_on(key);
    }
    let summary = h.engine.install_hotkeys();
    assert_eq!(summary.registered, 0);
    assert!(h.engine.active_bindings().is_empty());
    assert!(!h.engine.dispatch(1));
}

#[tokio::test(start_paused = true)]
async fn refresh_is_seen_without_rebinding() {
    let mut h = harness(&["A"], settings(None, None, None));
    h.apps.install("A");
    let b = h.apps.install("B");
    h.engine.refresh();
    h.engine.install_hotkeys();
    let attempts = h.hotkeys.attempts();

    h.dock.set(&["B", "A"]);
    let report = h.engine.refresh();
    assert_eq!(report.rows.len(), 2);
    assert_eq!(h.hotkeys.attempts(), attempts);

    h.engine.dispatch(1);
    time::sleep(DELAY * 5).await;
    assert_eq!(h.apps.launches(), vec![b]);
}

#[tokio::test(start_paused = true)]
async fn empty_dock_clears_mapping() {
    let h = harness(&["A", "B"], settings(None, None, None));
    h.engine.refresh();
    assert_eq!(assigned(&h.engine).len(), 2);
    h.dock.set(&[]);
    let report = h.engine.refresh();
    assert!(report.rows.is_empty());
    assert!(assigned(&h.engine).is_empty());
}

#[tokio::test(start_paused = true)]
async fn shutdown_releases_hotkeys_and_drops_pending_launches() {
    let mut h = harness(&["A"], settings(None, None, None));
    h.apps.install("A");
    h.engine.refresh();
    h.engine.install_hotkeys();

    assert!(h.engine.dispatch(1));
    h.engine.shutdown();
    h.engine.shutdown();
    time::sleep(DELAY * 5).await;

    assert!(h.apps.launches().is_empty());
    assert!(h.hotkeys.active().is_empty());
    assert_eq!(h.hotkeys.unregistered(), 10);
    assert!(!h.engine.dispatch(1));
}
