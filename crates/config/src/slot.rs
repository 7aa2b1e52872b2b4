//! Numbered hotkey targets.

use std::fmt;

use crate::{Error, Result};

/// A hotkey slot, 1 through 10. Slot 10 is bound to the "0" key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Slot(u8);

impl Slot {
    /// Lowest slot number.
    pub const MIN: u8 = 1;
    /// Highest slot number.
    pub const MAX: u8 = 10;
    /// Number of slots.
    pub const COUNT: usize = 10;

    /// Construct a slot from its number, if in range.
    pub fn new(n: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&n).then_some(Self(n))
    }

    /// Map a digit key to its slot: '1'..'9' map directly, '0' maps to 10.
    pub fn from_digit(c: char) -> Option<Self> {
        match c.to_digit(10)? {
            0 => Some(Self(10)),
            d => Self::new(d as u8),
        }
    }

    /// Parse a decimal slot number ("1" through "10").
    pub fn parse(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u8>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| Error::InvalidSlot(s.to_string()))
    }

    /// All slots in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// The slot number.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based index, convenient for fixed-size tables.
    pub fn index(self) -> usize {
        (self.0 - Self::MIN) as usize
    }

    /// The label of the key that triggers this slot ("1".."9", "0").
    pub fn key_label(self) -> String {
        if self.0 == 10 {
            "0".to_string()
        } else {
            self.0.to_string()
        }
    }

    /// The next slot up, if any.
    pub fn next(self) -> Option<Self> {
        Self::new(self.0 + 1)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_enforced() {
        assert!(Slot::new(0).is_none());
        assert!(Slot::new(11).is_none());
        assert_eq!(Slot::new(10).map(Slot::get), Some(10));
        assert_eq!(Slot::all().count(), Slot::COUNT);
    }

    #[test]
    fn zero_key_is_slot_ten() {
        assert_eq!(Slot::from_digit('0'), Slot::new(10));
        assert_eq!(Slot::from_digit('7'), Slot::new(7));
        assert_eq!(Slot::from_digit('x'), None);
        assert_eq!(Slot::new(10).map(Slot::key_label).as_deref(), Some("0"));
    }

    #[test]
    fn parse_accepts_ten_and_rejects_garbage() {
        assert_eq!(Slot::parse("10").ok(), Slot::new(10));
        assert_eq!(Slot::parse(" 3 ").ok(), Slot::new(3));
        assert!(matches!(Slot::parse("0"), Err(Error::InvalidSlot(_))));
        assert!(Slot::parse("ignore").is_err());
    }
}
