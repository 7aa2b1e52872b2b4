//! Locating application bundles on disk.

use std::path::{Path, PathBuf};

use config::FINDER_APP;

/// Where regular applications are installed, searched in order.
pub const SEARCH_ROOTS: &[&str] = &[
    "/Applications",
    "/System/Applications",
    "/System/Applications/Utilities",
];

/// Where Finder lives, searched in order.
pub const FINDER_ROOTS: &[&str] = &[
    "/System/Library/CoreServices",
    "/System/Applications",
    "/Applications",
];

/// `<name>.app`.
pub fn bundle_name(name: &str) -> String {
    format!("{name}.app")
}

/// True if `path` names an existing `.app` bundle.
pub fn is_app_bundle(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "app") && path.is_dir()
}

/// The first `<root>/<name>.app` that exists.
pub fn find_app_bundle<P: AsRef<Path>>(name: &str, roots: &[P]) -> Option<PathBuf> {
    if name.is_empty() || name.contains('/') {
        return None;
    }
    let bundle = bundle_name(name);
    roots
        .iter()
        .map(|root| root.as_ref().join(&bundle))
        .find(|p| is_app_bundle(p))
}

/// Resolve `name` against the standard install locations.
pub fn resolve_app_path(name: &str) -> Option<PathBuf> {
    let roots = if name == FINDER_APP {
        FINDER_ROOTS
    } else {
        SEARCH_ROOTS
    };
    find_app_bundle(name, roots)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn roots() -> (TempDir, Vec<PathBuf>) {
        let tmp = TempDir::new().expect("tempdir");
        let a = tmp.path().join("a");
        let b = tmp.path().join("b");
        fs::create_dir_all(&a).expect("mkdir a");
        fs::create_dir_all(&b).expect("mkdir b");
        (tmp, vec![a, b])
    }

    #[test]
    fn first_root_wins() {
        let (_tmp, roots) = roots();
        fs::create_dir(roots[0].join("Mail.app")).expect("mkdir");
        fs::create_dir(roots[1].join("Mail.app")).expect("mkdir");
        fs::create_dir(roots[1].join("Notes.app")).expect("mkdir");

        assert_eq!(find_app_bundle("Mail", &roots), Some(roots[0].join("Mail.app")));
        assert_eq!(find_app_bundle("Notes", &roots), Some(roots[1].join("Notes.app")));
        assert_eq!(find_app_bundle("Ghost", &roots), None);
    }

    #[test]
    fn plain_files_and_odd_names_are_rejected() {
        let (_tmp, roots) = roots();
        fs::write(roots[0].join("Fake.app"), b"").expect("write");
        assert_eq!(find_app_bundle("Fake", &roots), None);
        assert_eq!(find_app_bundle("", &roots), None);
        assert_eq!(find_app_bundle("../a/Fake", &roots), None);
    }

    #[test]
    fn removed_bundle_is_not_launchable() {
        let (_tmp, roots) = roots();
        let app = roots[0].join("Gone.app");
        fs::create_dir(&app).expect("mkdir");
        assert!(is_app_bundle(&app));
        fs::remove_dir(&app).expect("rmdir");
        assert!(!is_app_bundle(&app));
    }
}
