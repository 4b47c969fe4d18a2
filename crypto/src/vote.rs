//! Vote digests and signer recovery.
//!
//! A vote is authenticated by what was signed, never by who submitted it.
//! The signed message binds the governor's address, the proposal id and the
//! raw support code, so a signature cannot be replayed against another
//! governor, another proposal, or with a different choice.

use crate::account::derive_account;
use crate::error::CryptoError;
use crate::hash::blake2b_256_multi;
use crate::sign::{sign_message, verify_signature};
use crossdao_types::{AccountId, Hash32, PrivateKey, ProposalId, PublicKey, VoteSignature};

const VOTE_DOMAIN: &[u8] = b"crossdao/vote/v1";

/// The 32-byte structured message a voter signs.
pub type VoteDigest = Hash32;

/// Build the digest for `(governor, proposal, support_code)`.
///
/// `support_code` is the raw byte so that the digest can be rebuilt for
/// codes the caller has not validated yet.
pub fn vote_digest(governor: &AccountId, proposal: &ProposalId, support_code: u8) -> VoteDigest {
    Hash32::new(blake2b_256_multi(&[
        VOTE_DOMAIN,
        governor.as_bytes(),
        proposal.as_bytes(),
        &[support_code],
    ]))
}

/// Sign a vote digest.
pub fn sign_vote(digest: &VoteDigest, public: &PublicKey, private: &PrivateKey) -> VoteSignature {
    VoteSignature {
        public_key: public.clone(),
        signature: sign_message(digest.as_bytes(), private),
    }
}

/// Recover the account that produced `signature` over `digest`.
///
/// Pure: no state is read or written.
pub fn recover_signer(
    digest: &VoteDigest,
    signature: &VoteSignature,
) -> Result<AccountId, CryptoError> {
    if !verify_signature(digest.as_bytes(), &signature.signature, &signature.public_key) {
        return Err(CryptoError::InvalidSignature);
    }
    Ok(derive_account(&signature.public_key))
}
