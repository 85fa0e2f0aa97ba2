//! Percentage value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A whole-number value between 0 and 100 inclusive.
///
/// Used for display; computations keep the underlying fraction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    pub const ZERO: Self = Self(0);

    pub const HUNDRED: Self = Self(100);

    /// Creates a new Percentage, clamping to valid range.
    pub fn new(value: u8) -> Self {
        Self(value.min(100))
    }

    /// Rounds a fraction to the nearest whole percent, clamped into
    /// 0..=100. NaN maps to zero.
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction.is_nan() {
            return Self::ZERO;
        }
        Self((fraction * 100.0).round().clamp(0.0, 100.0) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_complete(&self) -> bool {
        *self == Self::HUNDRED
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
