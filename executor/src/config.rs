//! Relay executor configuration with TOML file support.

use crossdao_types::{AccountId, ChainId};
use serde::{Deserialize, Serialize};

use crate::error::ExecutorError;

/// Configuration for a [`RelayExecutor`](crate::RelayExecutor).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Initial mirrored voter set (term 1).
    pub voters: Vec<AccountId>,

    /// Chain the trusted governor runs on.
    pub home_chain: ChainId,

    /// Chain this executor runs on.
    pub local_chain: ChainId,

    /// Address of the trusted governor.
    pub dao_address: AccountId,

    /// Quorum ratio in percent of the mirrored voter set.
    #[serde(default = "default_ratio")]
    pub ratio: u8,

    /// Relayer allowed to submit records.
    pub admin: AccountId,
}

fn default_ratio() -> u8 {
    50
}

impl ExecutorConfig {
    pub fn from_toml_file(path: &str) -> Result<Self, ExecutorError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ExecutorError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ExecutorError> {
        toml::from_str(s).map_err(|e| ExecutorError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, ExecutorError> {
        toml::to_string_pretty(self).map_err(|e| ExecutorError::Config(e.to_string()))
    }
}
