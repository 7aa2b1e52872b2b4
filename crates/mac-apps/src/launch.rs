//! Launching applications with `open`.

use std::{path::Path, process::Command, thread};

use tracing::{debug, warn};

use crate::{Error, Result};

/// Path to `open`.
const OPEN: &str = "/usr/bin/open";

/// Build the `open` invocation for `path`.
///
/// `open -a` brings a running instance forward rather than starting a second
/// one; `-n` forces a new instance and `-g` keeps the app in the background.
pub fn open_command(path: &Path, activate: bool, reuse_existing: bool) -> Command {
    let mut cmd = Command::new(OPEN);
    if !activate {
        cmd.arg("-g");
    }
    if !reuse_existing {
        cmd.arg("-n");
    }
    cmd.arg("-a").arg(path);
    cmd
}

/// Ask LaunchServices to open the bundle at `path`. Returns once `open` has
/// been spawned; its exit status is logged from a reaper thread.
pub fn open_app(path: &Path, activate: bool, reuse_existing: bool) -> Result<()> {
    let mut child = open_command(path, activate, reuse_existing)
        .spawn()
        .map_err(|source| Error::Launch {
            path: path.display().to_string(),
            source,
        })?;
    let shown = path.display().to_string();
    debug!(path = %shown, pid = child.id(), "open_spawned");
    thread::spawn(move || match child.wait() {
        Ok(status) if status.success() => {}
        Ok(status) => warn!(path = %shown, code = ?status.code(), "open_failed"),
        Err(e) => warn!(path = %shown, error = %e, "open_wait_failed"),
    });
    Ok(())
}
