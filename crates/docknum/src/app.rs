//! The main-thread event loop.
//!
//! Hotkey presses arrive from Carbon on the main thread and are forwarded as
//! tao user events so the [`Engine`] is only ever touched from the loop. The
//! tokio runtime runs deferred launches and waits for Ctrl+C.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use config::Settings;
use docknum_engine::{Engine, HotkeyId, RegistrationSummary, Scheduler, Services};
use mac_hotkey::HotkeyManager;
use parking_lot::Mutex;
use tao::{
    event::Event,
    event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy},
    platform::macos::{ActivationPolicy, EventLoopExtMacOS},
};
use tokio::{
    runtime::{Builder, Runtime},
    signal,
};
use tracing::{debug, info, trace, warn};

use crate::{
    Result,
    services::{CarbonHotkeys, SystemDock, WorkspaceApps},
};

/// Events posted to the main loop.
#[derive(Debug, Clone, Copy)]
pub enum AppEvent {
    /// A registered hotkey was pressed.
    Hotkey(HotkeyId),
    /// Ctrl+C: release everything and exit.
    Shutdown,
}

/// Proxy shared with the hotkey handler and the signal task.
type SharedProxy = Arc<Mutex<EventLoopProxy<AppEvent>>>;

fn post(proxy: &SharedProxy, event: AppEvent) {
    if proxy.lock().send_event(event).is_err() {
        trace!(?event, "event_loop_gone");
    }
}

fn build_runtime() -> Result<Runtime> {
    Ok(Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("docknum-launch")
        .enable_all()
        .build()?)
}

fn print_mapping(engine: &Engine) {
    let report = engine.refresh();
    println!("\n📌 Current dock mapping:");
    print!("{report}");
    println!();
}

fn print_registration(summary: RegistrationSummary) {
    println!("✓ Registered {} hotkeys\n", summary.registered);
    if summary.registered == 0 {
        println!("⚠️  Warning: No hotkeys were registered successfully!");
        println!("This might be due to:");
        println!("  - Missing accessibility permissions");
        println!("  - Conflicts with system shortcuts");
        println!("  - Another app using the same hotkeys");
        println!();
    }
}

/// Run until Ctrl+C. Must be called on the main thread.
pub fn run(settings: Settings, refresh: Option<Duration>) -> Result<()> {
    let runtime = build_runtime()?;

    let mut event_loop = EventLoopBuilder::<AppEvent>::with_user_event().build();
    event_loop.set_activation_policy(ActivationPolicy::Accessory);
    let proxy: SharedProxy = Arc::new(Mutex::new(event_loop.create_proxy()));

    let manager = HotkeyManager::new()?;
    let hotkey_proxy = proxy.clone();
    manager.set_handler(move |id| post(&hotkey_proxy, AppEvent::Hotkey(id)));

    let signal_proxy = proxy.clone();
    runtime.spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => post(&signal_proxy, AppEvent::Shutdown),
            Err(e) => warn!(error = %e, "ctrl_c_listener_failed"),
        }
    });

    let services = Services {
        hotkeys: Box::new(CarbonHotkeys::new(manager)),
        dock: Arc::new(SystemDock),
        apps: Arc::new(WorkspaceApps),
    };
    let mut engine = Engine::new(settings, services, Scheduler::new(runtime.handle().clone()));

    println!("🚀 docknum - Dock App Launcher");
    print_mapping(&engine);
    print_registration(engine.install_hotkeys());
    println!("Press Ctrl+C to quit");

    let mut runtime = Some(runtime);
    let mut next_refresh = refresh.map(|every| Instant::now() + every);
    info!(refresh_secs = refresh.map(|d| d.as_secs()), "event_loop_started");

    event_loop.run(move |event, _, control_flow| {
        if let (Some(every), Some(when)) = (refresh, next_refresh)
            && Instant::now() >= when
        {
            debug!("periodic_refresh");
            print_mapping(&engine);
            next_refresh = Some(Instant::now() + every);
        }
        *control_flow = match next_refresh {
            Some(when) => ControlFlow::WaitUntil(when),
            None => ControlFlow::Wait,
        };

        match event {
            Event::UserEvent(AppEvent::Hotkey(id)) => {
                if !engine.dispatch(id) {
                    debug!(id, "hotkey_unhandled");
                }
            }
            Event::UserEvent(AppEvent::Shutdown) => {
                info!("shutdown_requested");
                engine.shutdown();
                println!("\n👋 Exiting");
                *control_flow = ControlFlow::Exit;
            }
            Event::LoopDestroyed => {
                engine.shutdown();
                if let Some(rt) = runtime.take() {
                    rt.shutdown_background();
                }
                info!("shutdown_complete");
            }
            _ => {}
        }
    });

    // The event loop runs forever and only exits when control flow is set to Exit
    #[allow(unreachable_code)]
    Ok(())
}
