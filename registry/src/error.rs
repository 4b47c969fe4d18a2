use crossdao_types::{AccountId, Point, Term};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("voter set must contain only non-null accounts")]
    InvalidVoter,

    #[error("voter {0} appears more than once")]
    DuplicateVoter(AccountId),

    #[error("governor must be a non-null account")]
    InvalidGovernor,

    #[error("only the governor may change the voter set (caller {0})")]
    OnlyGovernance(AccountId),

    #[error("invalid term: expected {expected}, got {got}")]
    InvalidTerm { expected: Term, got: Term },

    #[error("checkpoint at {at} precedes the latest checkpoint at {latest}")]
    PointRegression { at: Point, latest: Point },

    #[error("snapshot error: {0}")]
    Snapshot(String),
}
