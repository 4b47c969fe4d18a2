//! Cryptographic primitives for CrossDAO.
//!
//! - **Ed25519** for vote signatures
//! - **Blake2b-256** for proposal ids, payload hashes, event topics and vote digests
//! - Account derivation from public keys
//!
//! Everything here is pure: no function touches governance state, so the
//! governor and the relay executor share the exact same checks.

pub mod account;
pub mod error;
pub mod hash;
pub mod keys;
pub mod sign;
pub mod vote;

pub use account::derive_account;
pub use error::CryptoError;
pub use hash::{blake2b_256, blake2b_256_multi, event_topic, hash_payload, hash_proposal};
pub use keys::{generate_keypair, keypair_from_private, keypair_from_seed, public_from_private};
pub use sign::{sign_message, verify_signature};
pub use vote::{recover_signer, sign_vote, vote_digest, VoteDigest};
