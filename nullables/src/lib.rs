//! Nullable infrastructure for deterministic testing.
//!
//! The external edges of the system (voter key material, the processors an
//! executor dispatches to) are replaced here by implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Record what they were asked to do
//!
//! Usage: swap real implementations for nullables in tests and benches.

pub mod keys;
pub mod processor;

pub use keys::NullKeys;
pub use processor::{NullProcessorHost, ProcessorCall};
