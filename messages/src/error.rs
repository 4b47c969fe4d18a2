use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("record too large: {size} > {max}")]
    TooLarge { size: usize, max: usize },

    #[error("malformed record: {0}")]
    Malformed(String),

    #[error("encoding failed: {0}")]
    Encode(String),
}
