//! Destinations for rendered traces
//!
//! A tracer hands every rendered block to exactly one [`TraceSink`] as a
//! [`TraceRecord`]. Sinks are shared between threads and receive one record per
//! call; they never fail from the caller's point of view.
//!
//! - **WriterSink**: writes to any `std::io::Write`; `WriterSink::stderr()` is the
//!   default console sink
//! - **TracingEventSink**: forwards event-log records as `tracing` events; the
//!   default event-log sink
//! - **MemorySink**: keeps records in memory with callbacks and queries
//! - **NullSink**: discards everything
//!
//! Any `Fn(&TraceRecord) + Send + Sync` closure is also a sink.

pub mod eventlog_sink;
pub mod memory_sink;
pub mod null_sink;
pub mod trace_record;
pub mod writer_sink;

pub use eventlog_sink::{TracingEventSink, EVENTLOG_TARGET};
pub use memory_sink::{MemorySink, RecordCallback};
pub use null_sink::NullSink;
pub use trace_record::{Emission, RecordKind, TraceRecord};
pub use writer_sink::WriterSink;

/// Receives rendered traces
pub trait TraceSink: Send + Sync {
    /// Emit one record. Implementations handle their own failures.
    fn emit(&self, record: &TraceRecord);
}

impl<F> TraceSink for F
where
    F: Fn(&TraceRecord) + Send + Sync,
{
    fn emit(&self, record: &TraceRecord) {
        self(record)
    }
}
