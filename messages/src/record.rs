//! Relayed decision records.
//!
//! A [`RelayedRecord`] is what the home chain emits and what a relayer hands
//! to a destination: the emitting contract, the event topics, and opaque
//! event data. For a ratified decision the data is an encoded
//! [`DecisionData`].

use crate::codec::{decode, encode};
use crate::error::CodecError;
use crossdao_types::{AccountId, ChainId, Hash32, ProposalId, Term, VoteSignature};
use serde::{Deserialize, Serialize};

/// An event as emitted by the governor: `(source, topics, data)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayedRecord {
    /// Address of the emitting governor.
    pub source: AccountId,
    /// Event topic first, then any indexed values.
    pub topics: Vec<Hash32>,
    /// Event-specific encoded body.
    pub data: Vec<u8>,
}

impl RelayedRecord {
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        encode(self)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, CodecError> {
        decode(data)
    }

    /// The event topic, if present.
    pub fn event_topic(&self) -> Option<&Hash32> {
        self.topics.first()
    }
}

/// Body of a `ProposalRatified` record.
///
/// `instruction` stays a raw byte so that a receiver can report an unknown
/// instruction type distinctly from a malformed record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionData {
    pub proposal_id: ProposalId,
    pub from_chain: ChainId,
    pub to_chain: ChainId,
    pub instruction: u8,
    pub term: Term,
    pub nonce: u64,
    pub payload: Vec<u8>,
    pub payload_hash: Hash32,
    /// Signatures of every voter that voted for the proposal.
    pub supporters: Vec<VoteSignature>,
}

impl DecisionData {
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        encode(self)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, CodecError> {
        decode(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topics;
    use crossdao_types::{PublicKey, Signature};

    fn decision() -> DecisionData {
        DecisionData {
            proposal_id: Hash32::new([1; 32]),
            from_chain: ChainId(31337),
            to_chain: ChainId::BROADCAST,
            instruction: 0,
            term: Term(1),
            nonce: 1,
            payload: vec![9, 8, 7],
            payload_hash: Hash32::new([2; 32]),
            supporters: vec![VoteSignature {
                public_key: PublicKey([3; 32]),
                signature: Signature([4; 64]),
            }],
        }
    }

    #[test]
    fn record_roundtrip() {
        let record = RelayedRecord {
            source: AccountId::new([5; 20]),
            topics: vec![topics::proposal_ratified(), Hash32::new([1; 32])],
            data: decision().to_bytes().unwrap(),
        };
        let bytes = record.to_bytes().unwrap();
        let back = RelayedRecord::from_bytes(&bytes).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.event_topic(), Some(&topics::proposal_ratified()));
        assert_eq!(DecisionData::from_bytes(&back.data).unwrap(), decision());
    }

    #[test]
    fn decision_with_trailing_byte_rejected() {
        let mut bytes = decision().to_bytes().unwrap();
        bytes.push(0);
        assert!(DecisionData::from_bytes(&bytes).is_err());
    }

    #[test]
    fn unknown_instruction_still_decodes() {
        let mut data = decision();
        data.instruction = 200;
        let back = DecisionData::from_bytes(&data.to_bytes().unwrap()).unwrap();
        assert_eq!(back.instruction, 200);
    }

    #[test]
    fn json_view_uses_text_forms() {
        let json = serde_json::to_value(decision()).unwrap();
        assert_eq!(json["proposal_id"], serde_json::json!(Hash32::new([1; 32]).to_string()));
        assert_eq!(json["supporters"][0]["public_key"], serde_json::json!(hex_of(&[3; 32])));
    }

    fn hex_of(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}
