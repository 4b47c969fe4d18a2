//! Account identifiers with the `xdao_` textual form.
//!
//! An account is 20 raw bytes (derived from an Ed25519 public key by the
//! crypto crate). Human-facing encodings (config files, JSON, CLI) use:
//!
//! `xdao_` + base32(account, 32 chars) + base32(checksum, 8 chars)
//!
//! Checksum: first 5 bytes of Blake2b-256(account bytes).
//! Base32 alphabet: `13456789abcdefghijkmnopqrstuwxyz` (avoids ambiguous chars).

use crate::error::TypesError;
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const BASE32_ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";

/// Reverse lookup table: ASCII byte → 5-bit value (0xFF = invalid).
const BASE32_DECODE: [u8; 128] = {
    let mut table = [0xFFu8; 128];
    let alpha = BASE32_ALPHABET;
    let mut i = 0;
    while i < 32 {
        table[alpha[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// 160 bits → 32 base32 characters, no padding.
const ACCOUNT_CHARS: usize = 32;
/// 40 bits → 8 base32 characters.
const CHECKSUM_CHARS: usize = 8;
const CHECKSUM_LEN: usize = 5;

/// A 20-byte account identifier. The all-zero value is the null account.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AccountId([u8; 20]);

impl AccountId {
    /// Prefix of the textual form.
    pub const PREFIX: &'static str = "xdao_";

    /// The null account. Never a valid voter, governor or admin.
    pub const NULL: Self = Self([0u8; 20]);

    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn is_null(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Encode as `xdao_` + base32 body + base32 checksum.
    pub fn to_text(&self) -> String {
        let checksum = checksum(&self.0);
        let mut out = String::with_capacity(Self::PREFIX.len() + ACCOUNT_CHARS + CHECKSUM_CHARS);
        out.push_str(Self::PREFIX);
        out.push_str(&encode_base32(&self.0));
        out.push_str(&encode_base32(&checksum));
        out
    }

    /// Parse the textual form, verifying the checksum.
    pub fn from_text(s: &str) -> Result<Self, TypesError> {
        let invalid = || TypesError::InvalidAccount(s.to_string());
        let encoded = s.strip_prefix(Self::PREFIX).ok_or_else(invalid)?;
        if encoded.len() != ACCOUNT_CHARS + CHECKSUM_CHARS {
            return Err(invalid());
        }
        let (body, check) = encoded.split_at(ACCOUNT_CHARS);
        let bytes: [u8; 20] = decode_base32_fixed(body).ok_or_else(invalid)?;
        let expected: [u8; CHECKSUM_LEN] = decode_base32_fixed(check).ok_or_else(invalid)?;
        if checksum(&bytes) != expected {
            return Err(invalid());
        }
        Ok(Self(bytes))
    }
}

fn checksum(bytes: &[u8; 20]) -> [u8; CHECKSUM_LEN] {
    let digest = Blake2b::<U32>::digest(bytes);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[..CHECKSUM_LEN]);
    out
}

fn encode_base32(bytes: &[u8]) -> String {
    let num_chars = (bytes.len() * 8).div_ceil(5);
    let mut result = String::with_capacity(num_chars);

    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;

    for &byte in bytes {
        buffer = (buffer << 8) | byte as u64;
        bits_in_buffer += 8;
        while bits_in_buffer >= 5 {
            bits_in_buffer -= 5;
            let idx = ((buffer >> bits_in_buffer) & 0x1F) as usize;
            result.push(BASE32_ALPHABET[idx] as char);
        }
    }
    if bits_in_buffer > 0 {
        let idx = ((buffer << (5 - bits_in_buffer)) & 0x1F) as usize;
        result.push(BASE32_ALPHABET[idx] as char);
    }

    result
}

fn decode_base32_fixed<const N: usize>(s: &str) -> Option<[u8; N]> {
    let mut buffer: u64 = 0;
    let mut bits_in_buffer = 0;
    let mut result = [0u8; N];
    let mut pos = 0;

    for c in s.bytes() {
        if c >= 128 {
            return None;
        }
        let val = BASE32_DECODE[c as usize];
        if val == 0xFF {
            return None;
        }
        buffer = (buffer << 5) | val as u64;
        bits_in_buffer += 5;
        if bits_in_buffer >= 8 {
            bits_in_buffer -= 8;
            if pos < N {
                result[pos] = (buffer >> bits_in_buffer) as u8;
                pos += 1;
            }
        }
    }

    (pos == N).then_some(result)
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl FromStr for AccountId {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

impl From<[u8; 20]> for AccountId {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

// Text in human-readable formats (TOML, JSON), raw bytes on the wire.
impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_text())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_text(&s).map_err(serde::de::Error::custom)
        } else {
            <[u8; 20]>::deserialize(deserializer).map(Self)
        }
    }
}
