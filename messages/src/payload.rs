//! Typed proposal payloads.
//!
//! `Governance` and `ProcessorBinding` proposals carry one of these, encoded
//! with the record codec. `Signal` and `ValueTransfer` payloads are opaque
//! to governance and are handed to their processor untouched.

use crate::codec::{decode, encode};
use crate::error::CodecError;
use crossdao_types::{AccountId, ChainId, InstructionType, Term};
use serde::{Deserialize, Serialize};

/// A call that changes governance parameters once ratified.
///
/// Calls that change the voter-set version carry the term they create,
/// which must be exactly one past the current term when applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceCall {
    /// Length of the voting window, in points.
    SetVotingDelay { delay: u64 },
    /// New quorum ratio (percent) taking effect in `term`.
    UpdateVotingRatio { ratio: u8, term: Term },
    /// Replace the set of chains unicast proposals may target.
    BindNeighborChains { chain_ids: Vec<ChainId> },
    /// Replace the voter set, creating `term`.
    ChangeVoters { voters: Vec<AccountId>, term: Term },
}

impl GovernanceCall {
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        encode(self)
    }

    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        decode(data)
    }

    /// The term this call creates, if it changes the term.
    pub fn new_term(&self) -> Option<Term> {
        match self {
            Self::UpdateVotingRatio { term, .. } | Self::ChangeVoters { term, .. } => Some(*term),
            Self::SetVotingDelay { .. } | Self::BindNeighborChains { .. } => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SetVotingDelay { .. } => "set_voting_delay",
            Self::UpdateVotingRatio { .. } => "update_voting_ratio",
            Self::BindNeighborChains { .. } => "bind_neighbor_chains",
            Self::ChangeVoters { .. } => "change_voters",
        }
    }
}

/// Bind `processor` as the handler for `instruction` on the destination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorBinding {
    pub instruction: InstructionType,
    pub processor: AccountId,
}

impl ProcessorBinding {
    pub fn encode(&self) -> Result<Vec<u8>, CodecError> {
        encode(self)
    }

    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        decode(data)
    }
}
