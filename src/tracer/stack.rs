//! Call-stack capability
//!
//! Whether the runtime can capture backtraces is decided by the standard library
//! (`RUST_LIB_BACKTRACE` / `RUST_BACKTRACE`). The answer is queried once and cached
//! for the life of the process.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::sync::OnceLock;
use tracing::debug;

static AVAILABLE: OnceLock<bool> = OnceLock::new();

/// True when backtrace capture is enabled for this process
pub fn stack_traces_available() -> bool {
    *AVAILABLE.get_or_init(|| {
        let status = Backtrace::capture().status();
        let available = status == BacktraceStatus::Captured;
        debug!(?status, available, "Queried call stack capability");
        available
    })
}

/// Capture the current call stack, or `None` when the platform cannot produce one
pub(crate) fn capture() -> Option<String> {
    let backtrace = Backtrace::force_capture();
    match backtrace.status() {
        BacktraceStatus::Captured => Some(backtrace.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capability_is_stable() {
        assert_eq!(stack_traces_available(), stack_traces_available());
    }

    #[test]
    fn test_capture_is_non_empty_when_present() {
        if let Some(backtrace) = capture() {
            assert!(!backtrace.is_empty());
        }
    }
}
