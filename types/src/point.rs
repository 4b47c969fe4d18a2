//! Logical points (block heights) and governance terms.
//!
//! Points order every state change on the home chain; checkpoints are keyed
//! by the point at which they were written.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A logical block height on the home chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct Point(u64);

impl Point {
    /// The point at which initial state is written.
    pub const GENESIS: Self = Self(0);

    pub const fn new(height: u64) -> Self {
        Self(height)
    }

    pub fn height(&self) -> u64 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }

    pub fn saturating_add(&self, points: u64) -> Self {
        Self(self.0.saturating_add(points))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Version number of the voter set. Proposals are scoped to a term.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Term(pub u64);

impl Term {
    /// The term of a freshly constructed voter set.
    pub const INITIAL: Self = Self(1);

    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for Term {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
