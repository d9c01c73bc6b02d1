//! Null sink implementation following the Null Object Pattern
//!
//! A [`NullSink`] accepts every record and discards it. Hand it to a tracer to
//! silence one of its outputs without conditional checks at the call sites.

use super::trace_record::TraceRecord;
use super::TraceSink;

#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl NullSink {
    pub fn new() -> Self {
        Self
    }
}

impl TraceSink for NullSink {
    fn emit(&self, _record: &TraceRecord) {
        // Do nothing
    }
}
