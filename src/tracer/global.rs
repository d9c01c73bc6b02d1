//! Process-wide tracer used by the free functions.

use super::tracer_system::Tracer;
use std::sync::{OnceLock, PoisonError, RwLock};
use tracing::debug;

static GLOBAL: OnceLock<RwLock<Tracer>> = OnceLock::new();

fn cell() -> &'static RwLock<Tracer> {
    GLOBAL.get_or_init(|| RwLock::new(Tracer::default()))
}

/// The tracer the free `pretty_trace*` functions use
pub fn global_tracer() -> Tracer {
    cell().read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Replace the process-wide tracer. Calls already in flight finish with the old one.
pub fn set_global_tracer(tracer: Tracer) {
    debug!(stack_traces = tracer.stack_traces(), "Installing global tracer");
    *cell().write().unwrap_or_else(PoisonError::into_inner) = tracer;
}
