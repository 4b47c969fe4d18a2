//! Governor configuration with TOML file support.

use crossdao_types::{AccountId, ChainId};
use serde::{Deserialize, Serialize};

use crate::error::GovernanceError;

/// Who may cancel a live proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelPolicy {
    /// Only the proposer, and only while their weight is at most `max_weight`.
    Proposer { max_weight: u64 },
    /// Any account that currently holds voting weight.
    AnyVoter,
}

impl Default for CancelPolicy {
    fn default() -> Self {
        Self::Proposer { max_weight: 1 }
    }
}

/// Configuration for a [`Governor`](crate::Governor).
///
/// Can be loaded from a TOML file via [`GovernorConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernorConfig {
    /// Address the governor signs records as; must be the registry's governor.
    pub address: AccountId,

    /// Home chain id.
    pub chain_id: ChainId,

    /// Voting window length, in points.
    #[serde(default = "default_voting_delay")]
    pub voting_delay: u64,

    /// Quorum ratio in percent of the snapshot supply.
    #[serde(default = "default_ratio")]
    pub ratio: u8,

    /// Chains unicast proposals may target besides the home chain.
    #[serde(default)]
    pub neighbor_chains: Vec<ChainId>,

    #[serde(default)]
    pub cancel_policy: CancelPolicy,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_voting_delay() -> u64 {
    7
}

fn default_ratio() -> u8 {
    50
}

// ── Impl ───────────────────────────────────────────────────────────────

impl GovernorConfig {
    /// Config with defaults for everything but the identity fields.
    pub fn new(address: AccountId, chain_id: ChainId) -> Self {
        Self {
            address,
            chain_id,
            voting_delay: default_voting_delay(),
            ratio: default_ratio(),
            neighbor_chains: Vec::new(),
            cancel_policy: CancelPolicy::default(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, GovernanceError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| GovernanceError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, GovernanceError> {
        toml::from_str(s).map_err(|e| GovernanceError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, GovernanceError> {
        toml::to_string_pretty(self).map_err(|e| GovernanceError::Config(e.to_string()))
    }
}
