use crossdao_messages::CodecError;
use crossdao_registry::RegistryError;
use crossdao_types::{AccountId, ChainId, InstructionType, ProposalId, Term};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GovernanceError {
    #[error("{0} holds no voting weight")]
    NotVoter(AccountId),

    #[error("governor address is null or not the registry's governance caller")]
    InvalidGovernor,

    #[error("only the proposer may cancel this proposal")]
    NotProposer,

    #[error("voting ratio {0} outside 1..=99")]
    InvalidRatio(u8),

    #[error("voting delay must be at least one point")]
    InvalidVotingDelay,

    #[error("chain {0} cannot be used here")]
    InvalidChain(ChainId),

    #[error("unknown vote type {0}")]
    InvalidVoteType(u8),

    #[error("vote signature does not verify")]
    InvalidSignature,

    #[error("{instruction} proposals cannot target chain {to_chain}")]
    ModeMismatch {
        instruction: InstructionType,
        to_chain: ChainId,
    },

    #[error("proposal originates on chain {got}, this governor runs on {expected}")]
    ChainMismatch { expected: ChainId, got: ChainId },

    #[error("chain {0} is not bound as a neighbour")]
    UnboundChain(ChainId),

    #[error("payload hash does not match payload")]
    PayloadHashMismatch,

    #[error("payload does not decode: {0}")]
    InvalidPayload(String),

    #[error("dependent term is invalid: expected {expected}, got {got}")]
    InvalidTerm { expected: Term, got: Term },

    #[error("nonce is invalid: expected {expected}, got {got}")]
    InvalidNonce { expected: u64, got: u64 },

    #[error("term {0} already has a proposal in flight")]
    EngineBusy(Term),

    #[error("proposal {0} already exists")]
    ProposalExists(ProposalId),

    #[error("proposal {0} not found")]
    ProposalNotFound(ProposalId),

    #[error("voting is closed for this proposal")]
    VotingClosed,

    #[error("{0} has already voted on this proposal")]
    AlreadyVoted(AccountId),

    #[error("proposal has not succeeded")]
    NotSucceeded,

    #[error("proposal is not in a cancellable state")]
    WrongState,

    #[error("cancellation not permitted for {0}")]
    CancelNotPermitted(AccountId),

    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("snapshot error: {0}")]
    Snapshot(String),
}
