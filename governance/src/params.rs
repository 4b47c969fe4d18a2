//! Parameters the governor governs about itself.
//!
//! None of these have a direct setter: each changes only through a ratified
//! [`GovernanceCall`](crossdao_messages::GovernanceCall).

use crate::error::GovernanceError;
use crossdao_types::{ChainId, Term};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub const MIN_RATIO: u8 = 1;
pub const MAX_RATIO: u8 = 99;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernorParams {
    /// Voting window length, in points.
    pub voting_delay: u64,
    /// Quorum ratio keyed by the term it took effect in.
    ratios: BTreeMap<Term, u8>,
    /// Chains unicast proposals may target besides the home chain.
    neighbor_chains: BTreeSet<ChainId>,
}

impl GovernorParams {
    pub fn new(
        voting_delay: u64,
        ratio: u8,
        neighbor_chains: &[ChainId],
    ) -> Result<Self, GovernanceError> {
        validate_voting_delay(voting_delay)?;
        validate_ratio(ratio)?;
        let mut params = Self {
            voting_delay,
            ratios: BTreeMap::from([(Term::INITIAL, ratio)]),
            neighbor_chains: BTreeSet::new(),
        };
        params.bind_neighbor_chains(neighbor_chains)?;
        Ok(params)
    }

    /// Ratio in effect during `term`.
    pub fn ratio_at(&self, term: Term) -> u8 {
        self.ratios
            .range(..=term)
            .next_back()
            .map_or(0, |(_, ratio)| *ratio)
    }

    pub fn set_ratio(&mut self, ratio: u8, term: Term) -> Result<(), GovernanceError> {
        validate_ratio(ratio)?;
        self.ratios.insert(term, ratio);
        Ok(())
    }

    pub fn set_voting_delay(&mut self, delay: u64) -> Result<(), GovernanceError> {
        validate_voting_delay(delay)?;
        self.voting_delay = delay;
        Ok(())
    }

    /// Replace the neighbour set. Duplicates collapse; the broadcast sentinel
    /// is rejected.
    pub fn bind_neighbor_chains(&mut self, chain_ids: &[ChainId]) -> Result<(), GovernanceError> {
        if let Some(bad) = chain_ids.iter().find(|c| c.is_broadcast()) {
            return Err(GovernanceError::InvalidChain(*bad));
        }
        self.neighbor_chains = chain_ids.iter().copied().collect();
        Ok(())
    }

    pub fn neighbor_chains(&self) -> impl Iterator<Item = ChainId> + '_ {
        self.neighbor_chains.iter().copied()
    }

    pub fn is_neighbor(&self, chain: &ChainId) -> bool {
        self.neighbor_chains.contains(chain)
    }
}

pub fn validate_ratio(ratio: u8) -> Result<(), GovernanceError> {
    if !(MIN_RATIO..=MAX_RATIO).contains(&ratio) {
        return Err(GovernanceError::InvalidRatio(ratio));
    }
    Ok(())
}

pub fn validate_voting_delay(delay: u64) -> Result<(), GovernanceError> {
    if delay == 0 {
        return Err(GovernanceError::InvalidVotingDelay);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_bounds() {
        assert_eq!(validate_ratio(0), Err(GovernanceError::InvalidRatio(0)));
        assert_eq!(validate_ratio(100), Err(GovernanceError::InvalidRatio(100)));
        assert_eq!(validate_ratio(120), Err(GovernanceError::InvalidRatio(120)));
        assert!(validate_ratio(1).is_ok());
        assert!(validate_ratio(99).is_ok());
    }

    #[test]
    fn zero_delay_rejected() {
        assert_eq!(
            GovernorParams::new(0, 50, &[]),
            Err(GovernanceError::InvalidVotingDelay)
        );
    }

    #[test]
    fn ratio_is_versioned_by_term() {
        let mut params = GovernorParams::new(7, 50, &[]).unwrap();
        params.set_ratio(60, Term(3)).unwrap();
        assert_eq!(params.ratio_at(Term(1)), 50);
        assert_eq!(params.ratio_at(Term(2)), 50);
        assert_eq!(params.ratio_at(Term(3)), 60);
        assert_eq!(params.ratio_at(Term(9)), 60);
    }

    #[test]
    fn neighbors_dedup_and_reject_broadcast() {
        let mut params = GovernorParams::new(7, 50, &[]).unwrap();
        params
            .bind_neighbor_chains(&[ChainId(3), ChainId(1), ChainId(3)])
            .unwrap();
        assert_eq!(
            params.neighbor_chains().collect::<Vec<_>>(),
            vec![ChainId(1), ChainId(3)]
        );
        assert_eq!(
            params.bind_neighbor_chains(&[ChainId(2), ChainId::BROADCAST]),
            Err(GovernanceError::InvalidChain(ChainId::BROADCAST))
        );
        assert!(params.is_neighbor(&ChainId(3)));
    }
}
