//! Identity of a running application.

/// A running application as seen by AppKit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppInfo {
    /// Process id.
    pub pid: i32,
    /// Localized display name.
    pub name: String,
    /// Bundle identifier, if the process has one.
    pub bundle_id: Option<String>,
}

impl AppInfo {
    /// True if a process reporting `name` and `bundle_id` is this
    /// application. The bundle identifier decides when both sides have one;
    /// otherwise the display names must match.
    pub fn same_app(&self, name: Option<&str>, bundle_id: Option<&str>) -> bool {
        match (self.bundle_id.as_deref(), bundle_id) {
            (Some(want), Some(got)) => want == got,
            _ => name == Some(self.name.as_str()),
        }
    }
}
