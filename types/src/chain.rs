//! Chain identifiers and destination modes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a chain participating in cross-chain governance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChainId(pub u64);

/// How a proposal reaches its destination(s).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DestinationMode {
    /// Delivered to every bound destination chain.
    Broadcast,
    /// Delivered to exactly one named chain.
    Unicast,
}

impl ChainId {
    /// Sentinel destination meaning "every bound chain".
    pub const BROADCAST: Self = Self(u64::MAX);

    pub fn is_broadcast(&self) -> bool {
        *self == Self::BROADCAST
    }

    /// The destination mode this id selects when used as a proposal target.
    pub fn mode(&self) -> DestinationMode {
        if self.is_broadcast() {
            DestinationMode::Broadcast
        } else {
            DestinationMode::Unicast
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_broadcast() {
            f.write_str("broadcast")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl DestinationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Broadcast => "broadcast",
            Self::Unicast => "unicast",
        }
    }
}
