//! Destination-side relay executor for CrossDAO.
//!
//! An executor trusts exactly one governor on one home chain. It accepts a
//! relayed `ProposalRatified` record from its admin, re-derives every claim
//! in it, checks a quorum of supporter signatures against its mirrored voter
//! set, and dispatches the decision at most once.

pub mod config;
pub mod error;
pub mod host;
pub mod relay;

pub use config::ExecutorConfig;
pub use error::ExecutorError;
pub use host::{ProcessorError, ProcessorHost};
pub use relay::{ExecutionReceipt, RelayExecutor};
