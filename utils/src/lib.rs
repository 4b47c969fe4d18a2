//! Shared utilities for CrossDAO.

pub mod logging;

pub use logging::{init_logging, LogFormat, LoggingError};
