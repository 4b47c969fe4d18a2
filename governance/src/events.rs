//! Events the governor emits.
//!
//! Every event converts to a [`RelayedRecord`] whose first topic is the
//! event's topic hash. The `ProposalRatified` record is the one relayers
//! deliver to destination executors; its data is an encoded
//! [`DecisionData`].

use crossdao_crypto::event_topic;
use crossdao_messages::{encode, topics, CodecError, DecisionData, RelayedRecord};
use crossdao_types::{
    AccountId, ChainId, Hash32, InstructionType, Point, ProposalId, Term, VoteSupport,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernorEvent {
    ProposalCreated {
        proposal_id: ProposalId,
        proposer: AccountId,
        from_chain: ChainId,
        to_chain: ChainId,
        instruction: InstructionType,
        term: Term,
        nonce: u64,
        payload_hash: Hash32,
        snapshot: Point,
        deadline: Point,
    },
    VoteCast {
        proposal_id: ProposalId,
        voter: AccountId,
        support: VoteSupport,
        weight: u64,
    },
    ProposalCanceled {
        proposal_id: ProposalId,
    },
    VotingDelaySet {
        old: u64,
        new: u64,
    },
    VotingRatioUpdated {
        old: u8,
        new: u8,
        term: Term,
    },
    VotersChanged {
        term: Term,
        voters: Vec<AccountId>,
    },
    NeighborChainsBound {
        chain_ids: Vec<ChainId>,
    },
    ProposalRatified(DecisionData),
}

impl GovernorEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ProposalCreated { .. } => topics::PROPOSAL_CREATED,
            Self::VoteCast { .. } => topics::VOTE_CAST,
            Self::ProposalCanceled { .. } => topics::PROPOSAL_CANCELED,
            Self::VotingDelaySet { .. } => topics::VOTING_DELAY_SET,
            Self::VotingRatioUpdated { .. } => topics::VOTING_RATIO_UPDATED,
            Self::VotersChanged { .. } => topics::VOTERS_CHANGED,
            Self::NeighborChainsBound { .. } => topics::NEIGHBOR_CHAINS_BOUND,
            Self::ProposalRatified(_) => topics::PROPOSAL_RATIFIED,
        }
    }

    pub fn topic(&self) -> Hash32 {
        event_topic(self.name())
    }

    /// The proposal this event concerns, if any.
    pub fn proposal_id(&self) -> Option<ProposalId> {
        match self {
            Self::ProposalCreated { proposal_id, .. }
            | Self::VoteCast { proposal_id, .. }
            | Self::ProposalCanceled { proposal_id } => Some(*proposal_id),
            Self::ProposalRatified(data) => Some(data.proposal_id),
            Self::VotingDelaySet { .. }
            | Self::VotingRatioUpdated { .. }
            | Self::VotersChanged { .. }
            | Self::NeighborChainsBound { .. } => None,
        }
    }

    /// Build the record as emitted by `source`.
    ///
    /// Topics are the event topic followed by the proposal id when there is
    /// one.
    pub fn to_record(&self, source: AccountId) -> Result<RelayedRecord, CodecError> {
        let mut record_topics = vec![self.topic()];
        record_topics.extend(self.proposal_id());
        let data = match self {
            Self::ProposalRatified(decision) => decision.to_bytes()?,
            other => encode(other)?,
        };
        Ok(RelayedRecord {
            source,
            topics: record_topics,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratified_record_carries_decision_data() {
        let decision = DecisionData {
            proposal_id: Hash32::new([4; 32]),
            from_chain: ChainId(1),
            to_chain: ChainId::BROADCAST,
            instruction: 0,
            term: Term(1),
            nonce: 1,
            payload: vec![1, 2],
            payload_hash: Hash32::new([5; 32]),
            supporters: vec![],
        };
        let source = AccountId::new([9; 20]);
        let record = GovernorEvent::ProposalRatified(decision.clone())
            .to_record(source)
            .unwrap();
        assert_eq!(record.source, source);
        assert_eq!(record.topics, vec![topics::proposal_ratified(), decision.proposal_id]);
        assert_eq!(DecisionData::from_bytes(&record.data).unwrap(), decision);
    }

    #[test]
    fn parameter_events_have_single_topic() {
        let record = GovernorEvent::VotingDelaySet { old: 7, new: 3 }
            .to_record(AccountId::new([9; 20]))
            .unwrap();
        assert_eq!(record.topics, vec![event_topic(topics::VOTING_DELAY_SET)]);
        assert_eq!(
            crossdao_messages::decode::<GovernorEvent>(&record.data).unwrap(),
            GovernorEvent::VotingDelaySet { old: 7, new: 3 }
        );
    }
}
