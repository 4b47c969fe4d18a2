//! Decision records relayed from the home chain to destination chains.
//!
//! The relay transport is out of scope; this crate fixes only the byte
//! format both ends agree on.

pub mod codec;
pub mod error;
pub mod payload;
pub mod record;
pub mod topics;

pub use codec::{decode, encode, MAX_RECORD_SIZE};
pub use error::CodecError;
pub use payload::{GovernanceCall, ProcessorBinding};
pub use record::{DecisionData, RelayedRecord};
