//! Accessibility permission checks for docknum.
//!
//! Global hotkeys and app activation rely on the process being trusted for
//! Accessibility. Without it the process keeps running, but hotkeys may never
//! fire. This crate answers "are we trusted?" and can ask macOS to show its
//! permission prompt, which also adds the process to the Accessibility list in
//! System Settings.
//!
//! On other platforms every check reports `true`.

#[cfg(target_os = "macos")]
mod sys {
    use core_foundation::{
        base::TCFType,
        boolean::CFBoolean,
        dictionary::{CFDictionary, CFDictionaryRef},
        string::{CFString, CFStringRef},
    };

    #[link(name = "ApplicationServices", kind = "framework")]
    unsafe extern "C" {
        static kAXTrustedCheckOptionPrompt: CFStringRef;
        fn AXIsProcessTrusted() -> bool;
        fn AXIsProcessTrustedWithOptions(options: CFDictionaryRef) -> bool;
    }

    pub fn trusted() -> bool {
        unsafe { AXIsProcessTrusted() }
    }

    pub fn trusted_with_prompt() -> bool {
        let key = unsafe { CFString::wrap_under_get_rule(kAXTrustedCheckOptionPrompt) };
        let options = CFDictionary::from_CFType_pairs(&[(
            key.as_CFType(),
            CFBoolean::true_value().as_CFType(),
        )]);
        unsafe { AXIsProcessTrustedWithOptions(options.as_concrete_TypeRef()) }
    }
}

#[cfg(not(target_os = "macos"))]
mod sys {
    pub fn trusted() -> bool {
        true
    }

    pub fn trusted_with_prompt() -> bool {
        true
    }
}

/// True if the process is trusted for Accessibility. No side effects.
pub fn accessibility_ok() -> bool {
    sys::trusted()
}

/// Like [`accessibility_ok`], but when untrusted macOS shows its permission
/// prompt. The grant takes effect asynchronously; the return value reflects
/// the state before the user answers.
pub fn accessibility_prompt() -> bool {
    let ok = sys::trusted_with_prompt();
    if !ok {
        tracing::warn!("accessibility_permission_missing");
    }
    ok
}

#[cfg(all(test, not(target_os = "macos")))]
mod tests {
    use super::*;

    #[test]
    fn other_platforms_are_trusted() {
        assert!(accessibility_ok());
        assert!(accessibility_prompt());
    }
}
