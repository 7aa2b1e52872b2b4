//! Physical keys that can carry a docknum hotkey.
//!
//! Only digits and letters are bindable: digits trigger slots, letters can
//! carry a combo shortcut.

use std::{fmt, iter};

use crate::Slot;

/// Declares the key enum together with its label table.
macro_rules! bindable_keys {
    ( $( $variant:ident => $label:expr, )* ) => {
        /// A bindable physical key.
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        #[allow(missing_docs)]
        pub enum KeyCode {
            $( $variant, )*
        }

        impl KeyCode {
            /// Every bindable key.
            pub const ALL: &'static [Self] = &[ $( Self::$variant, )* ];

            /// The character printed on the key.
            pub fn label(self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )*
                }
            }
        }
    };
}

bindable_keys! {
    Digit0 => "0",
    Digit1 => "1",
    Digit2 => "2",
    Digit3 => "3",
    Digit4 => "4",
    Digit5 => "5",
    Digit6 => "6",
    Digit7 => "7",
    Digit8 => "8",
    Digit9 => "9",
    A => "A",
    B => "B",
    C => "C",
    D => "D",
    E => "E",
    F => "F",
    G => "G",
    H => "H",
    I => "I",
    J => "J",
    K => "K",
    L => "L",
    M => "M",
    N => "N",
    O => "O",
    P => "P",
    Q => "Q",
    R => "R",
    S => "S",
    T => "T",
    U => "U",
    V => "V",
    W => "W",
    X => "X",
    Y => "Y",
    Z => "Z",
}

impl KeyCode {
    /// The digit key that triggers `slot`.
    pub fn for_slot(slot: Slot) -> Self {
        match slot.get() {
            1 => Self::Digit1,
            2 => Self::Digit2,
            3 => Self::Digit3,
            4 => Self::Digit4,
            5 => Self::Digit5,
            6 => Self::Digit6,
            7 => Self::Digit7,
            8 => Self::Digit8,
            9 => Self::Digit9,
            _ => Self::Digit0,
        }
    }

    /// Look up a key by its printed character, case-insensitive for letters.
    pub fn from_char(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.label().chars().eq(iter::once(upper)))
    }

    /// Look up a letter key. Digits are rejected.
    pub fn from_letter(c: char) -> Option<Self> {
        if c.is_ascii_alphabetic() {
            Self::from_char(c)
        } else {
            None
        }
    }

    /// True for the digit row keys.
    pub fn is_digit(self) -> bool {
        self.label().chars().all(|c| c.is_ascii_digit())
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
