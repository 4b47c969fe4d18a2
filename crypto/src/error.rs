use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("signature does not verify against the vote digest")]
    InvalidSignature,
}
