//! Voter registry for CrossDAO governance.
//!
//! One account = one vote. The set is versioned by term and every version
//! is checkpointed by point, so quorum can be evaluated against the set
//! that existed when a proposal was created.

pub mod error;
pub mod registry;

pub use error::RegistryError;
pub use registry::{dedup_voters, Checkpoint, RegistrySnapshot, VotingPowerRegistry};
