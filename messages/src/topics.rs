//! Event names and their topic hashes.
//!
//! A record's first topic names the event that produced it. Only
//! [`PROPOSAL_RATIFIED`] records are accepted by a relay executor.

use crossdao_crypto::event_topic;
use crossdao_types::Hash32;

pub const PROPOSAL_CREATED: &str = "ProposalCreated";
pub const VOTE_CAST: &str = "VoteCast";
pub const PROPOSAL_CANCELED: &str = "ProposalCanceled";
pub const VOTING_DELAY_SET: &str = "VotingDelaySet";
pub const VOTING_RATIO_UPDATED: &str = "VotingRatioUpdated";
pub const VOTERS_CHANGED: &str = "VotersChanged";
pub const NEIGHBOR_CHAINS_BOUND: &str = "NeighborChainsBound";
pub const PROPOSAL_RATIFIED: &str = "ProposalRatified";

pub const ALL: [&str; 8] = [
    PROPOSAL_CREATED,
    VOTE_CAST,
    PROPOSAL_CANCELED,
    VOTING_DELAY_SET,
    VOTING_RATIO_UPDATED,
    VOTERS_CHANGED,
    NEIGHBOR_CHAINS_BOUND,
    PROPOSAL_RATIFIED,
];

/// Topic hash of the ratified-decision event.
pub fn proposal_ratified() -> Hash32 {
    event_topic(PROPOSAL_RATIFIED)
}

/// Name of the event whose topic is `topic`, if it is a known one.
pub fn name_of(topic: &Hash32) -> Option<&'static str> {
    ALL.into_iter().find(|name| event_topic(name) == *topic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn topics_are_unique() {
        let topics: HashSet<_> = ALL.iter().map(|n| event_topic(n)).collect();
        assert_eq!(topics.len(), ALL.len());
    }

    #[test]
    fn name_lookup() {
        assert_eq!(name_of(&proposal_ratified()), Some(PROPOSAL_RATIFIED));
        assert_eq!(name_of(&Hash32::ZERO), None);
    }
}
