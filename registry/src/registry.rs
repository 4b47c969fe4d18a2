//! Voting power registry: a versioned voter set with checkpointed weight.
//!
//! Weight is binary: an account in the current set has weight 1, anyone else
//! has 0. Total supply is the number of distinct voters. Every change appends
//! a [`Checkpoint`]; history is never rewritten, so a proposal can ask what the
//! set looked like at the point it was created.

use crate::error::RegistryError;
use crossdao_types::{AccountId, Point, Term};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The voter set as of one point.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Point at which this set took effect.
    pub point: Point,
    /// Term this set belongs to.
    pub term: Term,
    /// Distinct, non-null voters in first-seen order.
    pub voters: Vec<AccountId>,
}

impl Checkpoint {
    pub fn contains(&self, account: &AccountId) -> bool {
        self.voters.contains(account)
    }

    pub fn total_supply(&self) -> u64 {
        self.voters.len() as u64
    }
}

/// Serializable image of the registry.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegistrySnapshot {
    pub governor: AccountId,
    pub checkpoints: Vec<Checkpoint>,
}

#[derive(Debug)]
pub struct VotingPowerRegistry {
    /// Append-only, ordered by point (ties keep insertion order).
    checkpoints: Vec<Checkpoint>,
    /// The only caller allowed to mutate the set.
    governor: AccountId,
}

impl VotingPowerRegistry {
    /// Create a registry whose term-1 set is `voters`, checkpointed at genesis.
    ///
    /// Unlike [`change_voters`](Self::change_voters), construction is strict:
    /// a null or repeated voter is an error rather than being collapsed.
    pub fn new(voters: &[AccountId], governor: AccountId) -> Result<Self, RegistryError> {
        if governor.is_null() {
            return Err(RegistryError::InvalidGovernor);
        }
        let mut seen = HashSet::with_capacity(voters.len());
        for voter in voters {
            if voter.is_null() {
                return Err(RegistryError::InvalidVoter);
            }
            if !seen.insert(*voter) {
                return Err(RegistryError::DuplicateVoter(*voter));
            }
        }
        if voters.is_empty() {
            return Err(RegistryError::InvalidVoter);
        }

        tracing::info!(voters = voters.len(), governor = %governor, "voter registry created");
        Ok(Self {
            checkpoints: vec![Checkpoint {
                point: Point::GENESIS,
                term: Term::INITIAL,
                voters: voters.to_vec(),
            }],
            governor,
        })
    }

    /// The account allowed to change the voter set.
    pub fn governor(&self) -> AccountId {
        self.governor
    }

    /// Hand the governance role to another account.
    pub fn set_governor(
        &mut self,
        caller: &AccountId,
        new_governor: AccountId,
    ) -> Result<(), RegistryError> {
        self.ensure_governor(caller)?;
        if new_governor.is_null() {
            return Err(RegistryError::InvalidGovernor);
        }
        tracing::info!(from = %self.governor, to = %new_governor, "registry governor changed");
        self.governor = new_governor;
        Ok(())
    }

    /// Replace the voter set with `accounts` under `term`, effective at `at`.
    ///
    /// Duplicates collapse to one voter and null entries are dropped. The
    /// call fails if nothing non-null remains.
    pub fn change_voters(
        &mut self,
        caller: &AccountId,
        accounts: &[AccountId],
        term: Term,
        at: Point,
    ) -> Result<(), RegistryError> {
        self.ensure_governor(caller)?;
        self.ensure_next_term(term)?;
        self.ensure_not_before_latest(at)?;

        let voters = dedup_voters(accounts);
        if voters.is_empty() {
            return Err(RegistryError::InvalidVoter);
        }

        tracing::info!(
            term = %term,
            at = %at,
            supplied = accounts.len(),
            voters = voters.len(),
            "voter set changed"
        );
        self.checkpoints.push(Checkpoint {
            point: at,
            term,
            voters,
        });
        Ok(())
    }

    /// Move to `term` keeping the current voter set.
    pub fn advance_term(
        &mut self,
        caller: &AccountId,
        term: Term,
        at: Point,
    ) -> Result<(), RegistryError> {
        self.ensure_governor(caller)?;
        self.ensure_next_term(term)?;
        self.ensure_not_before_latest(at)?;

        let voters = self.latest().voters.clone();
        tracing::info!(term = %term, at = %at, "term advanced with unchanged voters");
        self.checkpoints.push(Checkpoint {
            point: at,
            term,
            voters,
        });
        Ok(())
    }

    /// Current weight of `account`: 1 for a voter, 0 otherwise.
    pub fn votes(&self, account: &AccountId) -> u64 {
        u64::from(self.latest().contains(account))
    }

    /// Current number of distinct voters.
    pub fn total_supply(&self) -> u64 {
        self.latest().total_supply()
    }

    /// Current voters in first-seen order.
    pub fn voters(&self) -> &[AccountId] {
        &self.latest().voters
    }

    pub fn current_term(&self) -> Term {
        self.latest().term
    }

    /// Distinct-voter count of the latest checkpoint strictly before `point`.
    ///
    /// Changes written at or after `point` are invisible. Returns 0 when no
    /// checkpoint precedes `point`.
    pub fn past_total_supply(&self, point: Point) -> u64 {
        let supply = self
            .checkpoint_before(point)
            .map_or(0, Checkpoint::total_supply);
        tracing::debug!(point = %point, supply, "past total supply");
        supply
    }

    /// Weight of `account` under the same rule as
    /// [`past_total_supply`](Self::past_total_supply).
    pub fn past_votes(&self, account: &AccountId, point: Point) -> u64 {
        self.checkpoint_before(point)
            .map_or(0, |cp| u64::from(cp.contains(account)))
    }

    /// Term in effect strictly before `point`, if any checkpoint precedes it.
    pub fn term_at(&self, point: Point) -> Option<Term> {
        self.checkpoint_before(point).map(|cp| cp.term)
    }

    /// Full checkpoint history, oldest first.
    pub fn checkpoints(&self) -> &[Checkpoint] {
        &self.checkpoints
    }

    /// Serialize the checkpoint arena.
    pub fn save_state(&self) -> Result<Vec<u8>, RegistryError> {
        let snapshot = RegistrySnapshot {
            governor: self.governor,
            checkpoints: self.checkpoints.clone(),
        };
        bincode::serialize(&snapshot).map_err(|e| RegistryError::Snapshot(e.to_string()))
    }

    /// Restore a registry from [`save_state`](Self::save_state) bytes.
    ///
    /// The arena is checked for the invariants every mutation maintains.
    pub fn load_state(data: &[u8]) -> Result<Self, RegistryError> {
        let snapshot: RegistrySnapshot =
            bincode::deserialize(data).map_err(|e| RegistryError::Snapshot(e.to_string()))?;
        if snapshot.governor.is_null() {
            return Err(RegistryError::InvalidGovernor);
        }
        validate_arena(&snapshot.checkpoints)?;
        Ok(Self {
            checkpoints: snapshot.checkpoints,
            governor: snapshot.governor,
        })
    }

    fn latest(&self) -> &Checkpoint {
        // Construction and load_state both guarantee at least one checkpoint.
        &self.checkpoints[self.checkpoints.len() - 1]
    }

    fn checkpoint_before(&self, point: Point) -> Option<&Checkpoint> {
        let idx = self.checkpoints.partition_point(|cp| cp.point < point);
        idx.checked_sub(1).map(|i| &self.checkpoints[i])
    }

    fn ensure_governor(&self, caller: &AccountId) -> Result<(), RegistryError> {
        if *caller != self.governor {
            return Err(RegistryError::OnlyGovernance(*caller));
        }
        Ok(())
    }

    fn ensure_next_term(&self, term: Term) -> Result<(), RegistryError> {
        let expected = self.current_term().next();
        if term != expected {
            return Err(RegistryError::InvalidTerm {
                expected,
                got: term,
            });
        }
        Ok(())
    }

    fn ensure_not_before_latest(&self, at: Point) -> Result<(), RegistryError> {
        let latest = self.latest().point;
        if at < latest {
            return Err(RegistryError::PointRegression { at, latest });
        }
        Ok(())
    }
}

/// Collapse duplicates and drop null accounts, keeping first-seen order.
pub fn dedup_voters(accounts: &[AccountId]) -> Vec<AccountId> {
    let mut seen = HashSet::with_capacity(accounts.len());
    accounts
        .iter()
        .filter(|a| !a.is_null() && seen.insert(**a))
        .copied()
        .collect()
}

fn validate_arena(checkpoints: &[Checkpoint]) -> Result<(), RegistryError> {
    let first = checkpoints
        .first()
        .ok_or_else(|| RegistryError::Snapshot("empty checkpoint arena".into()))?;
    if first.term != Term::INITIAL {
        return Err(RegistryError::Snapshot(format!(
            "first checkpoint has term {}",
            first.term
        )));
    }
    for pair in checkpoints.windows(2) {
        if pair[1].point < pair[0].point || pair[1].term != pair[0].term.next() {
            return Err(RegistryError::Snapshot(format!(
                "checkpoint at {} does not follow {}",
                pair[1].point, pair[0].point
            )));
        }
    }
    for cp in checkpoints {
        if cp.voters.is_empty() || dedup_voters(&cp.voters).len() != cp.voters.len() {
            return Err(RegistryError::Snapshot(format!(
                "checkpoint at {} holds an invalid voter set",
                cp.point
            )));
        }
    }
    Ok(())
}
