//! Nullable keys: deterministic voter key material.

use crossdao_crypto::{derive_account, keypair_from_seed, sign_vote, vote_digest};
use crossdao_types::{AccountId, KeyPair, ProposalId, VoteSignature, VoteSupport};

/// A fixed set of voter key pairs derived from their index.
///
/// Voter `i` always has the same key, so accounts and signatures are stable
/// across runs.
pub struct NullKeys {
    pairs: Vec<KeyPair>,
}

impl NullKeys {
    /// Create `count` voters.
    pub fn new(count: usize) -> Self {
        Self {
            pairs: (0..count).map(seeded).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Key pair of voter `index`.
    ///
    /// # Panics
    /// If `index` is out of range.
    pub fn pair(&self, index: usize) -> &KeyPair {
        &self.pairs[index]
    }

    /// Account of voter `index`.
    pub fn account(&self, index: usize) -> AccountId {
        derive_account(&self.pair(index).public)
    }

    /// Accounts of every voter, in index order.
    pub fn accounts(&self) -> Vec<AccountId> {
        (0..self.len()).map(|i| self.account(i)).collect()
    }

    /// Signature of voter `index` on a vote for `proposal` at `governor`.
    pub fn sign(
        &self,
        index: usize,
        governor: &AccountId,
        proposal: &ProposalId,
        support: VoteSupport,
    ) -> VoteSignature {
        let pair = self.pair(index);
        let digest = vote_digest(governor, proposal, support.as_u8());
        sign_vote(&digest, &pair.public, &pair.private)
    }

    /// A key pair that belongs to none of the voters.
    pub fn outsider(tag: u8) -> KeyPair {
        let mut seed = [0xee; 32];
        seed[0] = tag;
        keypair_from_seed(&seed)
    }
}

fn seeded(index: usize) -> KeyPair {
    let mut seed = [0u8; 32];
    seed[..8].copy_from_slice(&(index as u64).to_le_bytes());
    seed[31] = 0x5d;
    keypair_from_seed(&seed)
}
