//! Blake2b hashing for proposals, payloads and event topics.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use crossdao_types::{ChainId, Hash32, InstructionType, ProposalId, Term};

type Blake2b256 = Blake2b<U32>;

const PROPOSAL_DOMAIN: &[u8] = b"crossdao/proposal/v1";
const TOPIC_DOMAIN: &[u8] = b"crossdao/topic/v1";

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    finish(hasher)
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    finish(hasher)
}

fn finish(hasher: Blake2b256) -> [u8; 32] {
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash of an opaque proposal payload.
pub fn hash_payload(payload: &[u8]) -> Hash32 {
    Hash32::new(blake2b_256(payload))
}

/// Content hash identifying a proposal.
///
/// Binds every field a destination needs to trust: origin, destination,
/// instruction type, term, nonce and the payload itself. The payload is
/// length-prefixed so adjacent fields cannot be shifted into it.
pub fn hash_proposal(
    from_chain: ChainId,
    to_chain: ChainId,
    instruction: InstructionType,
    term: Term,
    nonce: u64,
    payload: &[u8],
) -> ProposalId {
    Hash32::new(blake2b_256_multi(&[
        PROPOSAL_DOMAIN,
        &from_chain.0.to_be_bytes(),
        &to_chain.0.to_be_bytes(),
        &[instruction.as_u8()],
        &term.0.to_be_bytes(),
        &nonce.to_be_bytes(),
        &(payload.len() as u64).to_be_bytes(),
        payload,
    ]))
}

/// Stable topic hash for a named event.
pub fn event_topic(name: &str) -> Hash32 {
    Hash32::new(blake2b_256_multi(&[TOPIC_DOMAIN, name.as_bytes()]))
}
