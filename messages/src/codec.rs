//! Record codec: fixed-width bincode with strict decoding.
//!
//! Decoding rejects trailing bytes and anything over [`MAX_RECORD_SIZE`], so
//! exactly one byte string decodes to a given value.

use crate::error::CodecError;
use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Maximum encoded record size in bytes.
pub const MAX_RECORD_SIZE: usize = 1024 * 1024; // 1 MiB

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_little_endian()
        .with_limit(MAX_RECORD_SIZE as u64)
        .reject_trailing_bytes()
}

/// Encode a value with the record options.
pub fn encode(value: &impl Serialize) -> Result<Vec<u8>, CodecError> {
    let bytes = options()
        .serialize(value)
        .map_err(|e| CodecError::Encode(e.to_string()))?;
    if bytes.len() > MAX_RECORD_SIZE {
        return Err(CodecError::TooLarge {
            size: bytes.len(),
            max: MAX_RECORD_SIZE,
        });
    }
    Ok(bytes)
}

/// Decode a value, consuming every byte of `data`.
pub fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<T, CodecError> {
    if data.len() > MAX_RECORD_SIZE {
        return Err(CodecError::TooLarge {
            size: data.len(),
            max: MAX_RECORD_SIZE,
        });
    }
    options()
        .deserialize(data)
        .map_err(|e| CodecError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_u64() {
        let bytes = encode(&42u64).unwrap();
        assert_eq!(bytes.len(), 8);
        assert_eq!(decode::<u64>(&bytes).unwrap(), 42);
    }

    #[test]
    fn trailing_bytes_rejected() {
        let mut bytes = encode(&7u64).unwrap();
        bytes.push(0);
        assert!(matches!(decode::<u64>(&bytes), Err(CodecError::Malformed(_))));
    }

    #[test]
    fn truncated_rejected() {
        let bytes = encode(&vec![1u8, 2, 3]).unwrap();
        assert!(decode::<Vec<u8>>(&bytes[..bytes.len() - 1]).is_err());
    }

    #[test]
    fn oversized_length_prefix_rejected() {
        let mut bytes = encode(&vec![0u8; 4]).unwrap();
        bytes[..8].copy_from_slice(&u64::MAX.to_le_bytes());
        assert!(decode::<Vec<u8>>(&bytes).is_err());
    }

    #[test]
    fn oversized_input_rejected() {
        let data = vec![0u8; MAX_RECORD_SIZE + 1];
        assert_eq!(
            decode::<Vec<u8>>(&data),
            Err(CodecError::TooLarge {
                size: MAX_RECORD_SIZE + 1,
                max: MAX_RECORD_SIZE
            })
        );
    }
}
