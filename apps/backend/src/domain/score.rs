//! Non-negative score value.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Points earned by a player. Only ever grows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Score(u64);

impl Score {
    pub const ZERO: Score = Score(0);

    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Additive combination; saturates instead of wrapping.
    pub const fn plus(self, other: Score) -> Score {
        Score(self.0.saturating_add(other.0))
    }
}

impl Add for Score {
    type Output = Score;

    fn add(self, rhs: Score) -> Score {
        self.plus(rhs)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
