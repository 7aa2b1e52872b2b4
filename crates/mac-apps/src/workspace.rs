//! Running applications via `NSWorkspace` and `NSRunningApplication`.

use objc2::rc::{Retained, autoreleasepool};
use objc2_app_kit::{NSApplicationActivationOptions, NSRunningApplication, NSWorkspace};
use tracing::{debug, warn};

use crate::{AppInfo, Error, Result};

fn info(app: &NSRunningApplication) -> Option<AppInfo> {
    if unsafe { app.isTerminated() } {
        return None;
    }
    let name = unsafe { app.localizedName() }?.to_string();
    Some(AppInfo {
        pid: unsafe { app.processIdentifier() },
        name,
        bundle_id: unsafe { app.bundleIdentifier() }.map(|s| s.to_string()),
    })
}

/// All running applications with a display name.
pub fn running_apps() -> Vec<AppInfo> {
    autoreleasepool(|_| {
        let ws = unsafe { NSWorkspace::sharedWorkspace() };
        let apps = unsafe { ws.runningApplications() };
        apps.iter().filter_map(|app| info(&app)).collect()
    })
}

/// The first running application whose display name is `name`.
pub fn find_by_name(name: &str) -> Option<AppInfo> {
    running_apps().into_iter().find(|a| a.name == name)
}

/// The first running application with bundle identifier `bundle_id`.
pub fn find_by_bundle_id(bundle_id: &str) -> Option<AppInfo> {
    running_apps()
        .into_iter()
        .find(|a| a.bundle_id.as_deref() == Some(bundle_id))
}

/// The live process behind `expected`, if its pid still belongs to it.
fn lookup(expected: &AppInfo) -> Option<Retained<NSRunningApplication>> {
    let app = unsafe {
        NSRunningApplication::runningApplicationWithProcessIdentifier(expected.pid as libc::pid_t)
    }?;
    if unsafe { app.isTerminated() } {
        return None;
    }
    let name = unsafe { app.localizedName() }.map(|s| s.to_string());
    let bundle_id = unsafe { app.bundleIdentifier() }.map(|s| s.to_string());
    if expected.same_app(name.as_deref(), bundle_id.as_deref()) {
        Some(app)
    } else {
        debug!(pid = expected.pid, app = %expected.name, found = ?name, "pid_reused");
        None
    }
}

/// True if `app` is still running under its recorded pid.
pub fn is_running(app: &AppInfo) -> bool {
    autoreleasepool(|_| lookup(app).is_some())
}

/// Bring `expected` to the foreground with all its windows.
pub fn activate(expected: &AppInfo) -> Result<()> {
    let pid = expected.pid;
    autoreleasepool(|_| {
        let app = lookup(expected).ok_or(Error::NotRunning(pid))?;
        let ok =
            unsafe { app.activateWithOptions(NSApplicationActivationOptions::ActivateAllWindows) };
        if ok {
            debug!(pid, "app_activated");
            Ok(())
        } else {
            warn!(pid, "activate_with_options_refused");
            Err(Error::ActivationFailed(pid))
        }
    })
}
