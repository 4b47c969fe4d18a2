//! Instruction types carried by proposals and decision records.
//!
//! The set is closed: the wire form is a single byte and anything outside
//! the known range is rejected at decode time.

use crate::chain::DestinationMode;
use crate::error::TypesError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum InstructionType {
    /// Governor parameter and voter-set changes, mirrored by every executor.
    Governance = 0,
    /// A ratified notice with no on-chain side effect at the destination.
    Signal = 1,
    /// Binds a processor to an instruction type on the destination executor.
    ProcessorBinding = 2,
    /// Moves value through the processor bound on the destination.
    ValueTransfer = 3,
}

impl InstructionType {
    pub const ALL: [Self; 4] = [
        Self::Governance,
        Self::Signal,
        Self::ProcessorBinding,
        Self::ValueTransfer,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// The only destination mode a proposal of this type may use.
    pub fn required_mode(&self) -> DestinationMode {
        match self {
            Self::Governance => DestinationMode::Broadcast,
            Self::Signal | Self::ProcessorBinding | Self::ValueTransfer => {
                DestinationMode::Unicast
            }
        }
    }

    /// Whether the payload hash may be left as the all-zero placeholder.
    pub fn permits_placeholder_hash(&self) -> bool {
        matches!(self, Self::ProcessorBinding | Self::ValueTransfer)
    }

    /// Whether destination execution is forwarded to a bound processor.
    pub fn is_dispatched(&self) -> bool {
        matches!(self, Self::ValueTransfer)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Governance => "governance",
            Self::Signal => "signal",
            Self::ProcessorBinding => "processor_binding",
            Self::ValueTransfer => "value_transfer",
        }
    }
}

impl TryFrom<u8> for InstructionType {
    type Error = TypesError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_u8() == value)
            .ok_or(TypesError::UnknownInstruction(value))
    }
}

impl fmt::Display for InstructionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_roundtrip() {
        for t in InstructionType::ALL {
            assert_eq!(InstructionType::try_from(t.as_u8()).unwrap(), t);
        }
    }

    #[test]
    fn out_of_range_rejected() {
        assert!(matches!(
            InstructionType::try_from(4),
            Err(TypesError::UnknownInstruction(4))
        ));
        assert!(InstructionType::try_from(0x10).is_err());
    }

    #[test]
    fn only_value_transfer_reaches_processors() {
        let dispatched: Vec<_> = InstructionType::ALL
            .iter()
            .filter(|t| t.is_dispatched())
            .collect();
        assert_eq!(dispatched, [&InstructionType::ValueTransfer]);
    }

    #[test]
    fn only_governance_broadcasts() {
        assert_eq!(
            InstructionType::Governance.required_mode(),
            DestinationMode::Broadcast
        );
        assert_eq!(
            InstructionType::ValueTransfer.required_mode(),
            DestinationMode::Unicast
        );
    }
}
