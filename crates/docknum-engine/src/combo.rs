//! Combo Dispatcher: one key press, several applications.
//!
//! Requests are spaced by a fixed stagger so the OS grants focus in list
//! order and the last application ends up in front. Combo requests carry no
//! tokens; a later press never cancels an earlier one.

use std::{sync::Arc, time::Duration};

use tracing::{debug, info, trace, warn};

use crate::{
    deps::{AppQuery, AppService, LaunchOptions},
    launcher::LaunchOutcome,
    scheduler::Scheduler,
};

/// Fires staggered activate-or-launch requests.
#[derive(Clone)]
pub struct ComboDispatcher {
    apps: Arc<dyn AppService>,
    scheduler: Scheduler,
    stagger: Duration,
}

impl ComboDispatcher {
    /// Dispatch through `apps`, spacing requests by `stagger`.
    pub fn new(apps: Arc<dyn AppService>, scheduler: Scheduler, stagger: Duration) -> Self {
        Self {
            apps,
            scheduler,
            stagger,
        }
    }

    /// Issue one request per name, the `i`th after `i * stagger`. Returns the
    /// number of requests scheduled.
    pub fn fire(&self, names: &[String]) -> usize {
        let mut scheduled = 0;
        for (i, name) in names.iter().enumerate() {
            let delay = self.stagger.saturating_mul(i as u32);
            let apps = self.apps.clone();
            let name = name.clone();
            let step = self.scheduler.after(delay, move || {
                activate_or_launch(apps.as_ref(), &name);
            });
            match step {
                Ok(()) => scheduled += 1,
                Err(e) => trace!(index = i, error = %e, "combo_step_rejected"),
            }
        }
        debug!(count = scheduled, stagger_ms = self.stagger.as_millis(), "combo_fired");
        scheduled
    }
}

/// Activate `name` if it is running, otherwise launch it if it can be found.
pub fn activate_or_launch(apps: &dyn AppService, name: &str) -> LaunchOutcome {
    if let Some(app) = apps.find_running(AppQuery::Name(name))
        && apps.is_alive(&app)
    {
        return match apps.activate(&app) {
            Ok(()) => {
                info!(app = name, pid = app.pid, "combo_activated");
                LaunchOutcome::Activated
            }
            Err(e) => {
                warn!(app = name, error = %e, "combo_activate_failed");
                LaunchOutcome::Failed
            }
        };
    }

    let Some(path) = apps.resolve_path(name).filter(|p| apps.is_launchable(p)) else {
        warn!(app = name, "combo_app_not_found");
        return LaunchOutcome::NotFound;
    };
    match apps.launch(&path, LaunchOptions::default()) {
        Ok(()) => {
            info!(app = name, path = %path.display(), "combo_launched");
            LaunchOutcome::Launched
        }
        Err(e) => {
            warn!(app = name, error = %e, "combo_launch_failed");
            LaunchOutcome::Failed
        }
    }
}
