//! Nullable processor host: records dispatches instead of running them.

use std::collections::{HashSet, VecDeque};

use crossdao_executor::{ProcessorError, ProcessorHost};
use crossdao_types::AccountId;

/// One dispatch seen by a [`NullProcessorHost`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessorCall {
    pub caller: AccountId,
    pub processor: AccountId,
    pub payload: Vec<u8>,
}

/// A processor host for testing.
///
/// Only deployed processors accept calls. Failures can be queued with
/// [`fail_next`](Self::fail_next); each queued failure is consumed by one
/// dispatch.
#[derive(Debug, Default)]
pub struct NullProcessorHost {
    deployed: HashSet<AccountId>,
    failures: VecDeque<String>,
    calls: Vec<ProcessorCall>,
}

impl NullProcessorHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `processor` callable.
    pub fn deploy(&mut self, processor: AccountId) -> &mut Self {
        self.deployed.insert(processor);
        self
    }

    /// Reject the next dispatch with `reason`.
    pub fn fail_next(&mut self, reason: impl Into<String>) -> &mut Self {
        self.failures.push_back(reason.into());
        self
    }

    /// Successful dispatches, oldest first.
    pub fn calls(&self) -> &[ProcessorCall] {
        &self.calls
    }

    /// Successful dispatches to `processor`.
    pub fn calls_to(&self, processor: &AccountId) -> Vec<&ProcessorCall> {
        self.calls
            .iter()
            .filter(|c| c.processor == *processor)
            .collect()
    }
}

impl ProcessorHost for NullProcessorHost {
    fn dispatch(
        &mut self,
        caller: &AccountId,
        processor: &AccountId,
        payload: &[u8],
    ) -> Result<(), ProcessorError> {
        if !self.deployed.contains(processor) {
            return Err(ProcessorError::UnknownProcessor(*processor));
        }
        if let Some(reason) = self.failures.pop_front() {
            return Err(ProcessorError::Rejected(reason));
        }
        self.calls.push(ProcessorCall {
            caller: *caller,
            processor: *processor,
            payload: payload.to_vec(),
        });
        Ok(())
    }
}
