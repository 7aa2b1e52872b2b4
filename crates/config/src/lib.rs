//! Settings for docknum.
//!
//! This crate turns the three positional inputs of the launcher (modifier name,
//! Finder directive, combo shortcut) into an immutable [`Settings`] value that
//! the engine consumes. Parsing is forgiving: unknown modifiers fall back to
//! Control, malformed Finder directives mean "ignore", and malformed combo
//! strings mean "no combo". Nothing here fails startup.
//!
//! The crate also owns the small value types shared across the workspace:
//! [`Slot`], [`KeyCode`], [`ModifierKey`], [`ComboSpec`] and [`ReservedSlots`].
#![warn(unsafe_op_in_unsafe_fn)]

mod combo;
mod error;
mod finder;
mod keys;
mod modifier;
mod settings;
mod slot;

pub use combo::{ComboSpec, ComboTrigger};
pub use error::{Error, Result};
pub use finder::{FINDER_APP, FinderPlacement};
pub use keys::KeyCode;
pub use modifier::ModifierKey;
pub use settings::{
    DEFAULT_LAUNCH_DELAY_MS, DEFAULT_STAGGER_MS, ReservedSlots, Settings, TimingOverrides,
};
pub use slot::Slot;
