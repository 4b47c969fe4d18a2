//! Parsing errors for the fundamental types.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("unknown instruction type {0}")]
    UnknownInstruction(u8),

    #[error("unknown vote support code {0}")]
    UnknownSupport(u8),

    #[error("invalid account: {0}")]
    InvalidAccount(String),

    #[error("invalid hash: {0}")]
    InvalidHash(String),
}
