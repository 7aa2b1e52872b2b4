//! Reading the Dock's application list through System Events.

use std::process::Command;

use tracing::{debug, warn};

use crate::{Error, Result};

/// AppleScript listing the names of the Dock's items in order. Separators,
/// folders and the Trash have empty names and are skipped.
pub const DOCK_SCRIPT: &str = r#"
tell application "System Events"
    set dockApps to {}
    tell process "Dock"
        tell list 1
            repeat with i from 1 to (count of UI elements)
                try
                    set elem to UI element i
                    set appName to name of elem
                    if appName is not "" then
                        set end of dockApps to appName
                    end if
                end try
            end repeat
        end tell
    end tell
end tell
return dockApps
"#;

/// Path to the AppleScript runner.
const OSASCRIPT: &str = "/usr/bin/osascript";

/// Run `script` with `osascript`, returning trimmed stdout.
pub fn run_applescript(script: &str) -> Result<String> {
    let output = Command::new(OSASCRIPT).arg("-e").arg(script).output()?;
    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    } else {
        Err(Error::Script(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ))
    }
}

/// Split `osascript`'s rendering of a list of strings into names.
///
/// Items are separated by `", "`; surrounding quotes and whitespace are
/// stripped and empty items dropped.
pub fn parse_dock_output(output: &str) -> Vec<String> {
    output
        .trim()
        .split(", ")
        .map(|s| s.trim().trim_matches('"').trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// The Dock's application names in Dock order. Failures are logged and
/// reported as an empty list.
pub fn dock_apps() -> Vec<String> {
    match run_applescript(DOCK_SCRIPT) {
        Ok(out) => {
            let names = parse_dock_output(&out);
            if names.is_empty() {
                warn!("dock_empty");
            }
            debug!(?names, "dock_enumerated");
            names
        }
        Err(e) => {
            warn!(error = %e, "dock_enumeration_failed");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_unquotes() {
        assert_eq!(
            parse_dock_output("Safari, Mail, \"Visual Studio Code\", Finder\n"),
            vec!["Safari", "Mail", "Visual Studio Code", "Finder"]
        );
    }

    #[test]
    fn empty_items_are_dropped() {
        assert!(parse_dock_output("").is_empty());
        assert!(parse_dock_output("  \n").is_empty());
        assert_eq!(parse_dock_output("Notes, , \"\""), vec!["Notes"]);
    }

    #[test]
    fn names_with_commas_but_no_space_survive() {
        assert_eq!(parse_dock_output("A,B, C"), vec!["A,B", "C"]);
    }
}
