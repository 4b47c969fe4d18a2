//! Account derivation from public keys.

use crate::hash::blake2b_256_multi;
use crossdao_types::{AccountId, PublicKey};

const ACCOUNT_DOMAIN: &[u8] = b"crossdao/account/v1";

/// Derive the 20-byte account of a public key: the first 20 bytes of
/// Blake2b-256(domain ‖ public_key).
pub fn derive_account(public_key: &PublicKey) -> AccountId {
    let digest = blake2b_256_multi(&[ACCOUNT_DOMAIN, public_key.as_bytes()]);
    let mut bytes = [0u8; 20];
    bytes.copy_from_slice(&digest[..20]);
    AccountId::new(bytes)
}
