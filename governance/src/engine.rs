//! Core governance engine: proposals through quorum to ratified records.
//!
//! The governor owns the voter registry and a logical clock. Every
//! successful mutating call advances the clock by one point; a failing call
//! returns before touching any state.

use std::collections::BTreeMap;

use crossdao_crypto::{hash_payload, hash_proposal, recover_signer, vote_digest};
use crossdao_messages::{DecisionData, GovernanceCall, ProcessorBinding, RelayedRecord};
use crossdao_registry::VotingPowerRegistry;
use crossdao_types::{
    AccountId, ChainId, InstructionType, Point, ProposalId, Term, VoteSignature, VoteSupport,
};
use serde::{Deserialize, Serialize};

use crate::config::{CancelPolicy, GovernorConfig};
use crate::error::GovernanceError;
use crate::events::GovernorEvent;
use crate::params::{validate_ratio, validate_voting_delay, GovernorParams};
use crate::proposal::{NewProposal, Proposal, ProposalState, VoteReceipt};

pub struct Governor {
    config: GovernorConfig,
    registry: VotingPowerRegistry,
    params: GovernorParams,
    /// Logical clock.
    point: Point,
    proposals: BTreeMap<ProposalId, Proposal>,
    /// The one non-terminal proposal allowed per term.
    busy: BTreeMap<Term, ProposalId>,
    /// Last executed nonce per destination lane. Lanes outlive terms.
    nonces: BTreeMap<ChainId, u64>,
    events: Vec<GovernorEvent>,
}

/// Serializable image of a governor, registry included.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GovernorSnapshot {
    pub config: GovernorConfig,
    pub params: GovernorParams,
    pub point: Point,
    pub proposals: BTreeMap<ProposalId, Proposal>,
    pub busy: BTreeMap<Term, ProposalId>,
    pub nonces: BTreeMap<ChainId, u64>,
    pub registry: Vec<u8>,
}

impl Governor {
    pub fn new(
        config: GovernorConfig,
        registry: VotingPowerRegistry,
    ) -> Result<Self, GovernanceError> {
        validate_ratio(config.ratio)?;
        validate_voting_delay(config.voting_delay)?;
        if config.address.is_null() || config.address != registry.governor() {
            return Err(GovernanceError::InvalidGovernor);
        }
        if config.chain_id.is_broadcast() {
            return Err(GovernanceError::InvalidChain(config.chain_id));
        }
        let params =
            GovernorParams::new(config.voting_delay, config.ratio, &config.neighbor_chains)?;

        tracing::info!(
            address = %config.address,
            chain = %config.chain_id,
            ratio = config.ratio,
            voting_delay = config.voting_delay,
            "governor initialized"
        );
        Ok(Self {
            config,
            registry,
            params,
            point: Point::GENESIS,
            proposals: BTreeMap::new(),
            busy: BTreeMap::new(),
            nonces: BTreeMap::new(),
            events: Vec::new(),
        })
    }

    // ── Proposals ──────────────────────────────────────────────────────

    /// Submit a proposal; it starts `Pending` with its voting window open.
    pub fn propose(
        &mut self,
        proposer: &AccountId,
        request: NewProposal,
    ) -> Result<ProposalId, GovernanceError> {
        if self.registry.votes(proposer) == 0 {
            return Err(GovernanceError::NotVoter(*proposer));
        }
        if request.from_chain != self.config.chain_id {
            return Err(GovernanceError::ChainMismatch {
                expected: self.config.chain_id,
                got: request.from_chain,
            });
        }
        let term = self.registry.current_term();
        if request.term != term {
            return Err(GovernanceError::InvalidTerm {
                expected: term,
                got: request.term,
            });
        }
        let expected_nonce = self.next_nonce(request.to_chain);
        if request.nonce != expected_nonce {
            return Err(GovernanceError::InvalidNonce {
                expected: expected_nonce,
                got: request.nonce,
            });
        }
        if request.to_chain.mode() != request.instruction.required_mode() {
            return Err(GovernanceError::ModeMismatch {
                instruction: request.instruction,
                to_chain: request.to_chain,
            });
        }
        if !request.to_chain.is_broadcast()
            && request.to_chain != self.config.chain_id
            && !self.params.is_neighbor(&request.to_chain)
        {
            return Err(GovernanceError::UnboundChain(request.to_chain));
        }
        check_payload_hash(&request)?;
        check_payload_decodes(request.instruction, &request.payload)?;
        let reclaimable = self.busy_holder_if_live(term)?;

        let id = hash_proposal(
            request.from_chain,
            request.to_chain,
            request.instruction,
            request.term,
            request.nonce,
            &request.payload,
        );
        if self.proposals.contains_key(&id) {
            return Err(GovernanceError::ProposalExists(id));
        }

        if let Some(expired) = reclaimable {
            if let Some(holder) = self.proposals.get_mut(&expired) {
                if holder.state == ProposalState::Pending {
                    holder.state = ProposalState::Defeated;
                }
            }
            tracing::debug!(proposal = %expired, term = %term, "reclaimed busy slot from expired proposal");
        }

        let snapshot = self.point;
        let deadline = snapshot.saturating_add(self.params.voting_delay);
        let proposal = Proposal {
            id,
            proposer: *proposer,
            from_chain: request.from_chain,
            to_chain: request.to_chain,
            instruction: request.instruction,
            term,
            nonce: request.nonce,
            payload: request.payload,
            payload_hash: request.payload_hash,
            snapshot,
            deadline,
            total_supply: self.registry.total_supply(),
            ratio: self.params.ratio_at(term),
            for_votes: 0,
            against_votes: 0,
            abstain_votes: 0,
            state: ProposalState::Pending,
            receipts: Vec::new(),
        };

        tracing::info!(
            proposal = %id,
            proposer = %proposer,
            instruction = %proposal.instruction,
            to = %proposal.to_chain,
            term = %term,
            nonce = proposal.nonce,
            deadline = %deadline,
            "proposal created"
        );
        self.events.push(GovernorEvent::ProposalCreated {
            proposal_id: id,
            proposer: *proposer,
            from_chain: proposal.from_chain,
            to_chain: proposal.to_chain,
            instruction: proposal.instruction,
            term,
            nonce: proposal.nonce,
            payload_hash: proposal.payload_hash,
            snapshot,
            deadline,
        });
        self.proposals.insert(id, proposal);
        self.busy.insert(term, id);
        self.tick();
        Ok(id)
    }

    /// Count a vote authenticated by its signature alone.
    ///
    /// The signer is recovered from `(governor address, proposal id,
    /// support code)`; whoever submits the call is irrelevant.
    pub fn cast_vote_by_sig(
        &mut self,
        proposal_id: &ProposalId,
        support_code: u8,
        signature: &VoteSignature,
    ) -> Result<ProposalState, GovernanceError> {
        let support = VoteSupport::try_from(support_code)
            .map_err(|_| GovernanceError::InvalidVoteType(support_code))?;
        let digest = vote_digest(&self.config.address, proposal_id, support_code);
        let voter =
            recover_signer(&digest, signature).map_err(|_| GovernanceError::InvalidSignature)?;
        let weight = self.registry.votes(&voter);
        if weight == 0 {
            return Err(GovernanceError::NotVoter(voter));
        }

        let now = self.point;
        let proposal = self
            .proposals
            .get_mut(proposal_id)
            .ok_or(GovernanceError::ProposalNotFound(*proposal_id))?;
        if proposal.has_voted(&voter) {
            return Err(GovernanceError::AlreadyVoted(voter));
        }
        if proposal.state_at(now) != ProposalState::Pending {
            return Err(GovernanceError::VotingClosed);
        }

        proposal.tally(VoteReceipt {
            voter,
            support,
            weight,
            signature: signature.clone(),
        });
        let state = proposal.state;
        let term = proposal.term;

        tracing::info!(
            proposal = %proposal_id,
            voter = %voter,
            support = ?support,
            for_votes = proposal.for_votes,
            against_votes = proposal.against_votes,
            state = ?state,
            "vote cast"
        );
        self.events.push(GovernorEvent::VoteCast {
            proposal_id: *proposal_id,
            voter,
            support,
            weight,
        });
        if state == ProposalState::Defeated {
            self.release_busy(term, proposal_id);
        }
        self.tick();
        Ok(state)
    }

    /// Apply a succeeded proposal and return its `ProposalRatified` record.
    pub fn execute(&mut self, proposal_id: &ProposalId) -> Result<RelayedRecord, GovernanceError> {
        let now = self.point;
        let proposal = self
            .proposals
            .get(proposal_id)
            .ok_or(GovernanceError::ProposalNotFound(*proposal_id))?;
        if proposal.state_at(now) != ProposalState::Succeeded {
            return Err(GovernanceError::NotSucceeded);
        }
        let current = self.registry.current_term();
        if proposal.term != current {
            return Err(GovernanceError::InvalidTerm {
                expected: current,
                got: proposal.term,
            });
        }

        let call = match proposal.instruction {
            InstructionType::Governance => Some(
                GovernanceCall::decode(&proposal.payload)
                    .map_err(|e| GovernanceError::InvalidPayload(e.to_string()))?,
            ),
            _ => None,
        };
        if let Some(new_term) = call.as_ref().and_then(GovernanceCall::new_term) {
            if new_term != current.next() {
                return Err(GovernanceError::InvalidTerm {
                    expected: current.next(),
                    got: new_term,
                });
            }
        }

        let decision = DecisionData {
            proposal_id: proposal.id,
            from_chain: proposal.from_chain,
            to_chain: proposal.to_chain,
            instruction: proposal.instruction.as_u8(),
            term: proposal.term,
            nonce: proposal.nonce,
            payload: proposal.payload.clone(),
            payload_hash: proposal.payload_hash,
            supporters: proposal.supporters(),
        };
        let ratified = GovernorEvent::ProposalRatified(decision);
        let record = ratified.to_record(self.config.address)?;
        let term = proposal.term;
        let lane = proposal.to_chain;
        let nonce = proposal.nonce;

        let side_effect = match call {
            Some(call) => Some(self.apply(call)?),
            None => None,
        };

        if let Some(proposal) = self.proposals.get_mut(proposal_id) {
            proposal.state = ProposalState::Executed;
        }
        self.nonces.insert(lane, nonce);
        self.release_busy(term, proposal_id);

        tracing::info!(proposal = %proposal_id, term = %term, to_chain = %lane, nonce, "proposal executed");
        self.events.extend(side_effect);
        self.events.push(ratified);
        self.tick();
        Ok(record)
    }

    /// Withdraw a `Pending` or `Succeeded` proposal.
    pub fn cancel(
        &mut self,
        caller: &AccountId,
        proposal_id: &ProposalId,
    ) -> Result<(), GovernanceError> {
        let now = self.point;
        let proposal = self
            .proposals
            .get(proposal_id)
            .ok_or(GovernanceError::ProposalNotFound(*proposal_id))?;
        if !matches!(
            proposal.state_at(now),
            ProposalState::Pending | ProposalState::Succeeded
        ) {
            return Err(GovernanceError::WrongState);
        }
        match self.config.cancel_policy {
            CancelPolicy::Proposer { max_weight } => {
                if *caller != proposal.proposer {
                    return Err(GovernanceError::NotProposer);
                }
                if self.registry.votes(&proposal.proposer) > max_weight {
                    return Err(GovernanceError::CancelNotPermitted(*caller));
                }
            }
            CancelPolicy::AnyVoter => {
                if self.registry.votes(caller) == 0 {
                    return Err(GovernanceError::CancelNotPermitted(*caller));
                }
            }
        }
        let term = proposal.term;

        if let Some(proposal) = self.proposals.get_mut(proposal_id) {
            proposal.state = ProposalState::Canceled;
        }
        self.release_busy(term, proposal_id);
        tracing::info!(proposal = %proposal_id, by = %caller, "proposal canceled");
        self.events.push(GovernorEvent::ProposalCanceled {
            proposal_id: *proposal_id,
        });
        self.tick();
        Ok(())
    }

    /// Move the clock forward by `points`.
    pub fn advance(&mut self, points: u64) {
        self.point = self.point.saturating_add(points);
    }

    // ── Reads ──────────────────────────────────────────────────────────

    pub fn state(&self, proposal_id: &ProposalId) -> Result<ProposalState, GovernanceError> {
        self.proposals
            .get(proposal_id)
            .map(|p| p.state_at(self.point))
            .ok_or(GovernanceError::ProposalNotFound(*proposal_id))
    }

    pub fn proposal(&self, proposal_id: &ProposalId) -> Option<&Proposal> {
        self.proposals.get(proposal_id)
    }

    pub fn has_voted(&self, proposal_id: &ProposalId, account: &AccountId) -> bool {
        self.proposals
            .get(proposal_id)
            .is_some_and(|p| p.has_voted(account))
    }

    /// Nonce the next proposal to `to_chain` must carry, whatever its term.
    pub fn next_nonce(&self, to_chain: ChainId) -> u64 {
        self.nonces
            .get(&to_chain)
            .map_or(1, |last| last.saturating_add(1))
    }

    /// Proposal currently holding `term`'s busy slot, if any.
    pub fn busy_proposal(&self, term: Term) -> Option<ProposalId> {
        self.busy.get(&term).copied()
    }

    pub fn voting_delay(&self) -> u64 {
        self.params.voting_delay
    }

    /// Quorum ratio of the current term.
    pub fn ratio(&self) -> u8 {
        self.params.ratio_at(self.registry.current_term())
    }

    pub fn neighbor_chains(&self) -> Vec<ChainId> {
        self.params.neighbor_chains().collect()
    }

    pub fn current_point(&self) -> Point {
        self.point
    }

    pub fn address(&self) -> AccountId {
        self.config.address
    }

    pub fn chain_id(&self) -> ChainId {
        self.config.chain_id
    }

    pub fn registry(&self) -> &VotingPowerRegistry {
        &self.registry
    }

    /// Take every event emitted since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<GovernorEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Persistence ────────────────────────────────────────────────────

    /// Serialize the proposal arena, parameters and registry.
    ///
    /// Undrained events are not part of the snapshot.
    pub fn save_state(&self) -> Result<Vec<u8>, GovernanceError> {
        let snapshot = GovernorSnapshot {
            config: self.config.clone(),
            params: self.params.clone(),
            point: self.point,
            proposals: self.proposals.clone(),
            busy: self.busy.clone(),
            nonces: self.nonces.clone(),
            registry: self.registry.save_state()?,
        };
        bincode::serialize(&snapshot).map_err(|e| GovernanceError::Snapshot(e.to_string()))
    }

    /// Restore a governor from [`save_state`](Self::save_state) bytes.
    pub fn load_state(data: &[u8]) -> Result<Self, GovernanceError> {
        let snapshot: GovernorSnapshot =
            bincode::deserialize(data).map_err(|e| GovernanceError::Snapshot(e.to_string()))?;
        let registry = VotingPowerRegistry::load_state(&snapshot.registry)?;
        if snapshot.config.address != registry.governor() {
            return Err(GovernanceError::InvalidGovernor);
        }
        Ok(Self {
            config: snapshot.config,
            registry,
            params: snapshot.params,
            point: snapshot.point,
            proposals: snapshot.proposals,
            busy: snapshot.busy,
            nonces: snapshot.nonces,
            events: Vec::new(),
        })
    }

    // ── Internals ──────────────────────────────────────────────────────

    fn tick(&mut self) {
        self.point = self.point.next();
    }

    fn release_busy(&mut self, term: Term, proposal_id: &ProposalId) {
        if self.busy.get(&term) == Some(proposal_id) {
            self.busy.remove(&term);
        }
    }

    /// Fails `EngineBusy` if `term`'s slot is held by a live proposal.
    /// Returns the holder if it expired and its slot can be reclaimed.
    fn busy_holder_if_live(&self, term: Term) -> Result<Option<ProposalId>, GovernanceError> {
        let Some(holder) = self.busy.get(&term) else {
            return Ok(None);
        };
        match self.proposals.get(holder).map(|p| p.state_at(self.point)) {
            Some(state) if !state.is_terminal() => Err(GovernanceError::EngineBusy(term)),
            _ => Ok(Some(*holder)),
        }
    }

    /// Apply a ratified governance call to the home chain.
    ///
    /// Each arm validates before it mutates, so an error leaves state as is.
    fn apply(&mut self, call: GovernanceCall) -> Result<GovernorEvent, GovernanceError> {
        let address = self.config.address;
        match call {
            GovernanceCall::SetVotingDelay { delay } => {
                let old = self.params.voting_delay;
                self.params.set_voting_delay(delay)?;
                tracing::info!(old, new = delay, "voting delay set");
                Ok(GovernorEvent::VotingDelaySet { old, new: delay })
            }
            GovernanceCall::UpdateVotingRatio { ratio, term } => {
                validate_ratio(ratio)?;
                let old = self.ratio();
                self.registry.advance_term(&address, term, self.point)?;
                self.params.set_ratio(ratio, term)?;
                tracing::info!(old, new = ratio, term = %term, "voting ratio updated");
                Ok(GovernorEvent::VotingRatioUpdated {
                    old,
                    new: ratio,
                    term,
                })
            }
            GovernanceCall::BindNeighborChains { chain_ids } => {
                self.params.bind_neighbor_chains(&chain_ids)?;
                let bound = self.neighbor_chains();
                tracing::info!(chains = ?bound, "neighbour chains bound");
                Ok(GovernorEvent::NeighborChainsBound { chain_ids: bound })
            }
            GovernanceCall::ChangeVoters { voters, term } => {
                self.registry
                    .change_voters(&address, &voters, term, self.point)?;
                let voters = self.registry.voters().to_vec();
                tracing::info!(term = %term, voters = voters.len(), "voters changed");
                Ok(GovernorEvent::VotersChanged { term, voters })
            }
        }
    }
}

fn check_payload_hash(request: &NewProposal) -> Result<(), GovernanceError> {
    let placeholder = request.instruction.permits_placeholder_hash() && request.payload_hash.is_zero();
    if !placeholder && request.payload_hash != hash_payload(&request.payload) {
        return Err(GovernanceError::PayloadHashMismatch);
    }
    Ok(())
}

fn check_payload_decodes(
    instruction: InstructionType,
    payload: &[u8],
) -> Result<(), GovernanceError> {
    let decoded = match instruction {
        InstructionType::Governance => GovernanceCall::decode(payload).map(drop),
        InstructionType::ProcessorBinding => ProcessorBinding::decode(payload).map(drop),
        InstructionType::Signal | InstructionType::ValueTransfer => Ok(()),
    };
    decoded.map_err(|e| GovernanceError::InvalidPayload(e.to_string()))
}
