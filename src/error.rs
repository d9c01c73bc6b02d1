//! Error types and result aliases for the pretty-trace library.
//!
//! Trace entry points never fail. This module defines [`PrettyTraceError`] and the
//! [`Result`] alias for the auxiliary operations that can: loading output options,
//! exporting records, writing to a sink directly and installing a log subscriber.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrettyTraceError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Logging error: {0}")]
    LoggingError(String),
}

pub type Result<T> = std::result::Result<T, PrettyTraceError>;
