//! Single-bit 4-state values carried by constant signals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The value of one constant bit: driven low, driven high, unknown or
/// high-impedance.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum Logic {
    /// Driven low.
    Zero = 0,
    /// Driven high.
    One = 1,
    /// Unknown.
    X = 2,
    /// High-impedance.
    Z = 3,
}

impl Logic {
    /// Converts a bit-vector digit to a value. Accepts `0`, `1`, `x` and `z`
    /// in either case.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Logic::Zero),
            '1' => Some(Logic::One),
            'x' | 'X' => Some(Logic::X),
            'z' | 'Z' => Some(Logic::Z),
            _ => None,
        }
    }

    /// Returns the lowercase digit for this value.
    pub fn to_char(self) -> char {
        match self {
            Logic::Zero => '0',
            Logic::One => '1',
            Logic::X => 'x',
            Logic::Z => 'z',
        }
    }

    /// Parses the digits of a bit-vector literal.
    ///
    /// Digits are written most-significant first, so the returned vector is
    /// reversed: index 0 is the rightmost digit. Returns `None` on any digit
    /// outside `01xz`.
    pub fn parse_msb_first(digits: &str) -> Option<Vec<Logic>> {
        digits.chars().rev().map(Logic::from_char).collect()
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
