//! Sink writing rendered blocks to any `std::io::Write`.

use super::trace_record::TraceRecord;
use super::TraceSink;
use crate::error::Result;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// Writes each record's [`display_text`](TraceRecord::display_text) followed by a
/// newline. The writer is held behind a mutex, so one record is written as one
/// uninterrupted block.
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl WriterSink<io::Stderr> {
    /// The default console sink
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Write one record, reporting I/O failures
    pub fn try_emit(&self, record: &TraceRecord) -> Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{}", record.display_text())?;
        writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> TraceSink for WriterSink<W> {
    fn emit(&self, record: &TraceRecord) {
        if let Err(e) = self.try_emit(record) {
            warn!(error = %e, record_id = %record.id, "Failed to write trace record");
        }
    }
}
