//! Translation from docknum keys to `global-hotkey` codes.

use config::{KeyCode, ModifierKey};
use global_hotkey::hotkey::{Code, Modifiers};

/// The `global-hotkey` modifier for `m`.
pub fn modifiers(m: ModifierKey) -> Modifiers {
    match m {
        ModifierKey::Control => Modifiers::CONTROL,
        ModifierKey::Command => Modifiers::SUPER,
        ModifierKey::Option => Modifiers::ALT,
    }
}

/// The `global-hotkey` code for `k`.
pub fn code(k: KeyCode) -> Code {
    match k {
        KeyCode::Digit0 => Code::Digit0,
        KeyCode::Digit1 => Code::Digit1,
        KeyCode::Digit2 => Code::Digit2,
        KeyCode::Digit3 => Code::Digit3,
        KeyCode::Digit4 => Code::Digit4,
        KeyCode::Digit5 => Code::Digit5,
        KeyCode::Digit6 => Code::Digit6,
        KeyCode::Digit7 => Code::Digit7,
        KeyCode::Digit8 => Code::Digit8,
        KeyCode::Digit9 => Code::Digit9,
        KeyCode::A => Code::KeyA,
        KeyCode::B => Code::KeyB,
        KeyCode::C => Code::KeyC,
        KeyCode::D => Code::KeyD,
        KeyCode::E => Code::KeyE,
        KeyCode::F => Code::KeyF,
        KeyCode::G => Code::KeyG,
        KeyCode::H => Code::KeyH,
        KeyCode::I => Code::KeyI,
        KeyCode::J => Code::KeyJ,
        KeyCode::K => Code::KeyK,
        KeyCode::L => Code::KeyL,
        KeyCode::M => Code::KeyM,
        KeyCode::N => Code::KeyN,
        KeyCode::O => Code::KeyO,
        KeyCode::P => Code::KeyP,
        KeyCode::Q => Code::KeyQ,
        KeyCode::R => Code::KeyR,
        KeyCode::S => Code::KeyS,
        KeyCode::T => Code::KeyT,
        KeyCode::U => Code::KeyU,
        KeyCode::V => Code::KeyV,
        KeyCode::W => Code::KeyW,
        KeyCode::X => Code::KeyX,
        KeyCode::Y => Code::KeyY,
        KeyCode::Z => Code::KeyZ,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use config::Slot;

    use super::*;

    #[test]
    fn codes_are_distinct() {
        let codes: HashSet<Code> = KeyCode::ALL.iter().map(|k| code(*k)).collect();
        assert_eq!(codes.len(), KeyCode::ALL.len());
    }

    #[test]
    fn command_is_super() {
        assert_eq!(modifiers(ModifierKey::Command), Modifiers::SUPER);
        assert_eq!(code(KeyCode::Digit0), Code::Digit0);
    }

    #[test]
    fn slots_map_to_the_digit_row() {
        let got: Vec<Code> = Slot::all().map(|s| code(KeyCode::for_slot(s))).collect();
        let want = vec![
            Code::Digit1,
            Code::Digit2,
            Code::Digit3,
            Code::Digit4,
            Code::Digit5,
            Code::Digit6,
            Code::Digit7,
            Code::Digit8,
            Code::Digit9,
            Code::Digit0,
        ];
        assert_eq!(got, want);
    }
}
