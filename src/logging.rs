//! Subscriber setup for applications that have none.
//!
//! Installs a `tracing_subscriber::fmt` subscriber filtered by `RUST_LOG`. To see
//! event-log traces on the console, enable their target, e.g.
//! `RUST_LOG=pretty_trace::eventlog=trace`.

use crate::error::{PrettyTraceError, Result};
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber
///
/// Fails if a global subscriber is already installed.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .map_err(|e| PrettyTraceError::LoggingError(e.to_string()))
}
