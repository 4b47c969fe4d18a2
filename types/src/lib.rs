//! Fundamental types for the CrossDAO governance engine.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account identifiers, content hashes, chain ids, logical points and terms,
//! instruction types, vote support codes, and signing key material.

pub mod account;
pub mod chain;
pub mod error;
pub mod hash;
pub mod instruction;
pub mod keys;
pub mod point;
pub mod support;

pub use account::AccountId;
pub use chain::{ChainId, DestinationMode};
pub use error::TypesError;
pub use hash::{Hash32, ProposalId};
pub use instruction::InstructionType;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature, VoteSignature};
pub use point::{Point, Term};
pub use support::VoteSupport;
