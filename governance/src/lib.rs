//! Cross-chain multisig governance for CrossDAO.
//!
//! Lifecycle: propose → signed votes → quorum → execute → `ProposalRatified`
//! record, which relayers carry to every destination executor.
//!
//! Key principles:
//! - One voter = one vote; weight comes from the checkpointed registry.
//! - Votes are authenticated by signature, never by the submitting account.
//! - One proposal in flight per term; nonces are sequential per destination lane.
//! - Governance parameters change only through ratified proposals.

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod params;
pub mod proposal;

pub use config::{CancelPolicy, GovernorConfig};
pub use engine::{Governor, GovernorSnapshot};
pub use error::GovernanceError;
pub use events::GovernorEvent;
pub use params::GovernorParams;
pub use proposal::{NewProposal, Proposal, ProposalState, VoteReceipt};
