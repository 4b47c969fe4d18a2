use proptest::prelude::*;

use crossdao_types::{AccountId, ChainId, DestinationMode, Hash32, InstructionType, Point, VoteSupport};

proptest! {
    /// Textual account form parses back to the same bytes.
    #[test]
    fn account_text_roundtrip(bytes in prop::array::uniform20(0u8..)) {
        let account = AccountId::new(bytes);
        let text = account.to_text();
        prop_assert_eq!(AccountId::from_text(&text).unwrap(), account);
    }

    /// Flipping any body character of an account breaks the checksum.
    #[test]
    fn account_text_single_char_corruption_detected(
        bytes in prop::array::uniform20(0u8..),
        pos in 5usize..37,
    ) {
        let text = AccountId::new(bytes).to_text();
        let mut chars: Vec<char> = text.chars().collect();
        chars[pos] = if chars[pos] == '1' { '3' } else { '1' };
        let corrupted: String = chars.into_iter().collect();
        prop_assert!(AccountId::from_text(&corrupted).is_err());
    }

    /// AccountId::is_null is true only for all-zero bytes.
    #[test]
    fn account_is_null_correct(bytes in prop::array::uniform20(0u8..)) {
        prop_assert_eq!(AccountId::new(bytes).is_null(), bytes == [0u8; 20]);
    }

    /// Hash32 hex display parses back.
    #[test]
    fn hash_hex_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let hash = Hash32::new(bytes);
        prop_assert_eq!(hash.to_string().parse::<Hash32>().unwrap(), hash);
    }

    /// Only the sentinel selects broadcast mode.
    #[test]
    fn chain_mode_correct(id in 0u64..u64::MAX) {
        prop_assert_eq!(ChainId(id).mode(), DestinationMode::Unicast);
    }

    /// Instruction bytes decode iff they are in range.
    #[test]
    fn instruction_decode_range(byte in any::<u8>()) {
        prop_assert_eq!(InstructionType::try_from(byte).is_ok(), byte < 4);
    }

    /// Support codes decode iff they are in range.
    #[test]
    fn support_decode_range(byte in any::<u8>()) {
        prop_assert_eq!(VoteSupport::try_from(byte).is_ok(), byte < 3);
    }

    /// Point ordering follows heights and saturating_add never wraps.
    #[test]
    fn point_ordering(a in any::<u64>(), b in any::<u64>()) {
        prop_assert_eq!(Point::new(a) <= Point::new(b), a <= b);
        prop_assert!(Point::new(a).saturating_add(b) >= Point::new(a));
    }
}

#[test]
fn broadcast_sentinel_mode() {
    assert_eq!(ChainId::BROADCAST.mode(), DestinationMode::Broadcast);
}
