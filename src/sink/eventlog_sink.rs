//! Event-log sink backed by `tracing`
//!
//! Event and marker records are forwarded as `tracing` events at TRACE level under
//! the `pretty_trace::eventlog` target, where profilers and subscribers listening
//! for that target pick them up. Markers carry their name in a `marker` field so
//! timeline tools can tell them apart from free-form events.

use super::trace_record::{Emission, RecordKind, TraceRecord};
use super::TraceSink;
use tracing::trace;

/// Target of every event emitted by [`TracingEventSink`]
pub const EVENTLOG_TARGET: &str = "pretty_trace::eventlog";

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl TracingEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl TraceSink for TracingEventSink {
    fn emit(&self, record: &TraceRecord) {
        let sequenced = record.flavor == Emission::Sequenced;
        match record.kind {
            RecordKind::Marker => trace!(
                target: "pretty_trace::eventlog",
                marker = %record.text,
                id = %record.id,
                sequenced
            ),
            _ => trace!(
                target: "pretty_trace::eventlog",
                id = %record.id,
                sequenced,
                "{}",
                record.text
            )
        }
    }
}
