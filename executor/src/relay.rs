//! Relay executor: the destination-side half of cross-chain governance.
//!
//! A relayed record is trusted only after the executor has rebuilt every
//! claim in it from bytes: the emitting governor, the proposal id, the
//! payload hash, the destination, and a quorum of supporter signatures
//! checked against the executor's own mirror of the voter set.

use std::collections::{HashMap, HashSet};

use crossdao_crypto::{hash_payload, hash_proposal, recover_signer, vote_digest};
use crossdao_messages::{
    topics, DecisionData, GovernanceCall, ProcessorBinding, RelayedRecord,
};
use crossdao_registry::{RegistryError, VotingPowerRegistry};
use crossdao_types::{
    AccountId, ChainId, InstructionType, Point, ProposalId, Term, VoteSupport,
};

use crate::config::ExecutorConfig;
use crate::error::ExecutorError;
use crate::host::ProcessorHost;

/// What a successful [`RelayExecutor::execute`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionReceipt {
    pub proposal_id: ProposalId,
    pub instruction: InstructionType,
    pub term: Term,
    /// Number of distinct supporters that authorised the record.
    pub supporters: u64,
}

pub struct RelayExecutor<H> {
    admin: AccountId,
    dao_address: AccountId,
    home_chain: ChainId,
    local_chain: ChainId,
    ratio: u8,
    /// Mirror of the governor's voter set; the dao address is its governor.
    mirror: VotingPowerRegistry,
    bindings: HashMap<InstructionType, AccountId>,
    executed: HashSet<ProposalId>,
    /// Advances once per executed record; keys mirror checkpoints.
    point: Point,
    host: H,
}

impl<H: ProcessorHost> RelayExecutor<H> {
    pub fn new(config: ExecutorConfig, host: H) -> Result<Self, ExecutorError> {
        if !(1..=99).contains(&config.ratio) {
            return Err(ExecutorError::InvalidRatio(config.ratio));
        }
        if config.admin.is_null() {
            return Err(ExecutorError::InvalidAdmin);
        }
        if config.dao_address.is_null() {
            return Err(ExecutorError::InvalidDaoAddress);
        }
        let mirror = VotingPowerRegistry::new(&config.voters, config.dao_address)
            .map_err(registry_error)?;

        tracing::info!(
            dao = %config.dao_address,
            home = %config.home_chain,
            local = %config.local_chain,
            voters = mirror.total_supply(),
            ratio = config.ratio,
            "relay executor initialized"
        );
        Ok(Self {
            admin: config.admin,
            dao_address: config.dao_address,
            home_chain: config.home_chain,
            local_chain: config.local_chain,
            ratio: config.ratio,
            mirror,
            bindings: HashMap::new(),
            executed: HashSet::new(),
            point: Point::GENESIS,
            host,
        })
    }

    /// Validate an encoded [`RelayedRecord`] and dispatch its decision.
    ///
    /// Nothing is mutated unless every check passes and dispatch succeeds.
    pub fn execute(
        &mut self,
        caller: &AccountId,
        encoded: &[u8],
    ) -> Result<ExecutionReceipt, ExecutorError> {
        let result = self.try_execute(caller, encoded);
        if let Err(e) = &result {
            tracing::warn!(caller = %caller, error = %e, "relayed record rejected");
        }
        result
    }

    fn try_execute(
        &mut self,
        caller: &AccountId,
        encoded: &[u8],
    ) -> Result<ExecutionReceipt, ExecutorError> {
        if *caller != self.admin {
            return Err(ExecutorError::NotAdmin(*caller));
        }
        let record = RelayedRecord::from_bytes(encoded)
            .map_err(|e| ExecutorError::InvalidProposal(e.to_string()))?;
        if record.event_topic() != Some(&topics::proposal_ratified()) {
            return Err(ExecutorError::InvalidTopic);
        }
        if record.source != self.dao_address {
            return Err(ExecutorError::InvalidSourceContract(record.source));
        }
        let decision = DecisionData::from_bytes(&record.data)
            .map_err(|e| ExecutorError::InvalidProposal(e.to_string()))?;
        let instruction = InstructionType::try_from(decision.instruction)
            .map_err(|_| ExecutorError::InvalidGovernorType(decision.instruction))?;
        if record.topics.len() != 2 || record.topics[1] != decision.proposal_id {
            return Err(ExecutorError::InvalidProposal(
                "indexed proposal id does not match decision".into(),
            ));
        }
        self.check_structure(&decision, instruction)?;

        if self.executed.contains(&decision.proposal_id) {
            return Err(ExecutorError::AlreadyExecuted(decision.proposal_id));
        }
        let supporters = self.count_supporters(&decision)?;
        let voters = self.mirror.total_supply();
        if u128::from(supporters) * 100 < u128::from(self.ratio) * u128::from(voters) {
            return Err(ExecutorError::InsufficientVotes {
                have: supporters,
                voters,
            });
        }
        let term = self.mirror.current_term();
        if decision.term != term {
            return Err(ExecutorError::InvalidTerm {
                expected: term,
                got: decision.term,
            });
        }

        self.dispatch(instruction, &decision.payload)?;

        self.executed.insert(decision.proposal_id);
        self.point = self.point.next();
        tracing::info!(
            proposal = %decision.proposal_id,
            instruction = %instruction,
            term = %decision.term,
            supporters,
            "relayed decision executed"
        );
        Ok(ExecutionReceipt {
            proposal_id: decision.proposal_id,
            instruction,
            term: decision.term,
            supporters,
        })
    }

    /// Rebuild the id and check hash, mode, origin and destination.
    fn check_structure(
        &self,
        decision: &DecisionData,
        instruction: InstructionType,
    ) -> Result<(), ExecutorError> {
        let invalid = |reason: &str| Err(ExecutorError::InvalidProposal(reason.to_string()));

        let id = hash_proposal(
            decision.from_chain,
            decision.to_chain,
            instruction,
            decision.term,
            decision.nonce,
            &decision.payload,
        );
        if id != decision.proposal_id {
            return invalid("proposal id does not match its contents");
        }
        let placeholder = instruction.permits_placeholder_hash() && decision.payload_hash.is_zero();
        if !placeholder && decision.payload_hash != hash_payload(&decision.payload) {
            return invalid("payload hash does not match payload");
        }
        if decision.to_chain.mode() != instruction.required_mode() {
            return invalid("destination mode not allowed for instruction type");
        }
        if decision.from_chain != self.home_chain {
            return invalid("record did not originate on the home chain");
        }
        if decision.to_chain != self.local_chain && !decision.to_chain.is_broadcast() {
            return invalid("record is not addressed to this chain");
        }
        Ok(())
    }

    /// Every supporter must recover to a distinct mirrored voter.
    fn count_supporters(&self, decision: &DecisionData) -> Result<u64, ExecutorError> {
        let digest = vote_digest(
            &self.dao_address,
            &decision.proposal_id,
            VoteSupport::For.as_u8(),
        );
        let mut seen = HashSet::with_capacity(decision.supporters.len());
        for signature in &decision.supporters {
            let voter =
                recover_signer(&digest, signature).map_err(|_| ExecutorError::InvalidVoter)?;
            if self.mirror.votes(&voter) == 0 || !seen.insert(voter) {
                return Err(ExecutorError::InvalidVoter);
            }
        }
        Ok(seen.len() as u64)
    }

    fn dispatch(
        &mut self,
        instruction: InstructionType,
        payload: &[u8],
    ) -> Result<(), ExecutorError> {
        if instruction.is_dispatched() {
            let processor = *self
                .bindings
                .get(&instruction)
                .ok_or(ExecutorError::ProcessorNotBound(instruction))?;
            let caller = self.dao_address;
            self.host.dispatch(&caller, &processor, payload)?;
            return Ok(());
        }
        match instruction {
            InstructionType::Governance => {
                let call = GovernanceCall::decode(payload)
                    .map_err(|e| ExecutorError::InvalidProposal(e.to_string()))?;
                self.apply_governance(call)
            }
            InstructionType::ProcessorBinding => {
                let binding = ProcessorBinding::decode(payload)
                    .map_err(|e| ExecutorError::InvalidProposal(e.to_string()))?;
                if binding.processor.is_null() {
                    self.bindings.remove(&binding.instruction);
                    tracing::info!(instruction = %binding.instruction, "processor unbound");
                } else {
                    self.bindings.insert(binding.instruction, binding.processor);
                    tracing::info!(
                        instruction = %binding.instruction,
                        processor = %binding.processor,
                        "processor bound"
                    );
                }
                Ok(())
            }
            // Processor-bound types returned above.
            InstructionType::Signal | InstructionType::ValueTransfer => {
                tracing::debug!(instruction = %instruction, "recorded without side effect");
                Ok(())
            }
        }
    }

    /// Mirror the voter-set and ratio changes of a governance call.
    fn apply_governance(&mut self, call: GovernanceCall) -> Result<(), ExecutorError> {
        let dao = self.dao_address;
        let at = self.point;
        match call {
            GovernanceCall::ChangeVoters { voters, term } => {
                self.mirror
                    .change_voters(&dao, &voters, term, at)
                    .map_err(registry_error)?;
                tracing::info!(term = %term, voters = self.mirror.total_supply(), "mirrored voters changed");
            }
            GovernanceCall::UpdateVotingRatio { ratio, term } => {
                if !(1..=99).contains(&ratio) {
                    return Err(ExecutorError::InvalidRatio(ratio));
                }
                self.mirror
                    .advance_term(&dao, term, at)
                    .map_err(registry_error)?;
                self.ratio = ratio;
                tracing::info!(term = %term, ratio, "mirrored voting ratio updated");
            }
            GovernanceCall::SetVotingDelay { .. } | GovernanceCall::BindNeighborChains { .. } => {
                tracing::debug!(call = call.name(), "home-chain call acknowledged");
            }
        }
        Ok(())
    }

    // ── Reads ──────────────────────────────────────────────────────────

    pub fn is_executed(&self, proposal_id: &ProposalId) -> bool {
        self.executed.contains(proposal_id)
    }

    pub fn processor(&self, instruction: InstructionType) -> Option<AccountId> {
        self.bindings.get(&instruction).copied()
    }

    pub fn voters(&self) -> &[AccountId] {
        self.mirror.voters()
    }

    pub fn term(&self) -> Term {
        self.mirror.current_term()
    }

    pub fn ratio(&self) -> u8 {
        self.ratio
    }

    pub fn admin(&self) -> AccountId {
        self.admin
    }

    pub fn dao_address(&self) -> AccountId {
        self.dao_address
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

fn registry_error(e: RegistryError) -> ExecutorError {
    match e {
        RegistryError::DuplicateVoter(voter) => ExecutorError::DuplicateVoter(voter),
        RegistryError::InvalidGovernor => ExecutorError::InvalidDaoAddress,
        RegistryError::InvalidTerm { expected, got } => ExecutorError::InvalidTerm { expected, got },
        RegistryError::InvalidVoter
        | RegistryError::OnlyGovernance(_)
        | RegistryError::PointRegression { .. }
        | RegistryError::Snapshot(_) => ExecutorError::InvalidVoter,
    }
}
