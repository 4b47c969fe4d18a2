//! Proposals and their lifecycle.

use crossdao_types::{
    AccountId, ChainId, Hash32, InstructionType, Point, ProposalId, Term, VoteSignature,
    VoteSupport,
};
use serde::{Deserialize, Serialize};

/// Lifecycle of a proposal.
///
/// `Pending → Succeeded | Defeated`, `Succeeded → Executed`,
/// `Pending | Succeeded → Canceled`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalState {
    /// Voting is open.
    Pending,
    /// Quorum of `For` votes reached; awaiting execution.
    Succeeded,
    /// Quorum of `Against` votes reached, or the window closed without quorum.
    Defeated,
    /// Applied and relayed.
    Executed,
    /// Withdrawn before execution.
    Canceled,
}

impl ProposalState {
    /// Terminal states release the term's busy slot.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Executed | Self::Canceled | Self::Defeated)
    }
}

/// What a proposer submits. The id is derived from these fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewProposal {
    pub from_chain: ChainId,
    pub to_chain: ChainId,
    pub instruction: InstructionType,
    /// Must equal the registry's current term.
    pub term: Term,
    /// Next value of the `to_chain` lane.
    pub nonce: u64,
    pub payload: Vec<u8>,
    /// Hash of `payload`, or [`Hash32::ZERO`] where the instruction permits a
    /// placeholder.
    pub payload_hash: Hash32,
}

/// A counted vote, kept so the decision record can carry the signatures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
    pub voter: AccountId,
    pub support: VoteSupport,
    pub weight: u64,
    pub signature: VoteSignature,
}

/// A governance proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Content hash over `(from, to, instruction, term, nonce, payload)`.
    pub id: ProposalId,
    pub proposer: AccountId,
    pub from_chain: ChainId,
    pub to_chain: ChainId,
    pub instruction: InstructionType,
    /// Term the proposal was created under; execution requires it still current.
    pub term: Term,
    pub nonce: u64,
    pub payload: Vec<u8>,
    pub payload_hash: Hash32,
    /// Point the proposal was created at.
    pub snapshot: Point,
    /// Last point at which votes are accepted.
    pub deadline: Point,
    /// Voter count captured at creation.
    pub total_supply: u64,
    /// Quorum ratio captured at creation.
    pub ratio: u8,
    pub for_votes: u64,
    pub against_votes: u64,
    pub abstain_votes: u64,
    /// Stored state. Read through [`Proposal::state_at`] to account for expiry.
    pub state: ProposalState,
    /// Counted votes in arrival order.
    pub receipts: Vec<VoteReceipt>,
}

impl Proposal {
    /// State as observed at `now`: a `Pending` proposal past its deadline
    /// reads as `Defeated`.
    pub fn state_at(&self, now: Point) -> ProposalState {
        if self.state == ProposalState::Pending && now > self.deadline {
            ProposalState::Defeated
        } else {
            self.state
        }
    }

    pub fn has_voted(&self, account: &AccountId) -> bool {
        self.receipts.iter().any(|r| r.voter == *account)
    }

    /// Weight needed on one side: `weight * 100 >= ratio * supply`.
    pub fn reaches_quorum(&self, weight: u64) -> bool {
        u128::from(weight) * 100 >= u128::from(self.ratio) * u128::from(self.total_supply)
    }

    /// Record a vote and move to `Succeeded` or `Defeated` if a side reached
    /// quorum. `For` is evaluated first.
    pub fn tally(&mut self, receipt: VoteReceipt) {
        match receipt.support {
            VoteSupport::For => self.for_votes += receipt.weight,
            VoteSupport::Against => self.against_votes += receipt.weight,
            VoteSupport::Abstain => self.abstain_votes += receipt.weight,
        }
        self.receipts.push(receipt);

        if self.reaches_quorum(self.for_votes) {
            self.state = ProposalState::Succeeded;
        } else if self.reaches_quorum(self.against_votes) {
            self.state = ProposalState::Defeated;
        }
    }

    /// Signatures of every `For` vote, in arrival order.
    pub fn supporters(&self) -> Vec<VoteSignature> {
        self.receipts
            .iter()
            .filter(|r| r.support == VoteSupport::For)
            .map(|r| r.signature.clone())
            .collect()
    }
}
