//! The seam between the executor and the processors it dispatches to.

use crossdao_types::AccountId;
use thiserror::Error;

/// Runs bound processors on the destination chain.
///
/// Only `ValueTransfer` decisions reach a host; every other instruction type
/// is handled inside the executor.
pub trait ProcessorHost {
    /// Invoke `processor` with the ratified payload. `caller` is the executor's
    /// own identity as seen by the processor.
    fn dispatch(
        &mut self,
        caller: &AccountId,
        processor: &AccountId,
        payload: &[u8],
    ) -> Result<(), ProcessorError>;
}

/// Failure raised by a processor; the executor propagates it unchanged.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProcessorError {
    #[error("no processor deployed at {0}")]
    UnknownProcessor(AccountId),

    #[error("processor rejected payload: {0}")]
    Rejected(String),
}
