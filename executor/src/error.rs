use crossdao_types::{AccountId, InstructionType, ProposalId, Term};
use thiserror::Error;

use crate::host::ProcessorError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExecutorError {
    #[error("{0} is not the relay admin")]
    NotAdmin(AccountId),

    #[error("voting ratio {0} outside 1..=99")]
    InvalidRatio(u8),

    #[error("admin must be a non-null account")]
    InvalidAdmin,

    #[error("dao address must be a non-null account")]
    InvalidDaoAddress,

    #[error("voter set is empty, contains a null account, or a supporter is not a voter")]
    InvalidVoter,

    #[error("voter {0} appears more than once")]
    DuplicateVoter(AccountId),

    #[error("record is not a ratified decision")]
    InvalidTopic,

    #[error("record was emitted by {0}, not the trusted governor")]
    InvalidSourceContract(AccountId),

    #[error("invalid proposal: {0}")]
    InvalidProposal(String),

    #[error("invalid governor type {0}")]
    InvalidGovernorType(u8),

    #[error("proposal {0} was already executed")]
    AlreadyExecuted(ProposalId),

    #[error("insufficient votes: {have} supporters of {voters}")]
    InsufficientVotes { have: u64, voters: u64 },

    #[error("invalid term: expected {expected}, got {got}")]
    InvalidTerm { expected: Term, got: Term },

    #[error("no processor bound for {0}")]
    ProcessorNotBound(InstructionType),

    #[error(transparent)]
    Processor(#[from] ProcessorError),

    #[error("configuration error: {0}")]
    Config(String),
}
