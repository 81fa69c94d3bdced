//! Whole-number completion share.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer percentage in `0..=100`, rounded down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    pub const ZERO: Self = Self(0);

    /// Share of `done` in `total`. Overshoot is capped and an empty total is zero.
    pub fn of(done: usize, total: usize) -> Self {
        if total == 0 {
            return Self::ZERO;
        }
        Self(((done.min(total) * 100) / total) as u8)
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
