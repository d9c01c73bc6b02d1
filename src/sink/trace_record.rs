//! Trace records handed to sinks
//!
//! A [`TraceRecord`] is one emission: the rendered text plus what kind of trace
//! produced it and how it was sequenced.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// What produced a record. Determines which sink of a tracer receives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Plain pretty trace, routed to the console sink
    Message,
    /// Pretty trace that asked for a call stack, routed to the console sink
    Stack,
    /// Event-log message
    Event,
    /// Named event-log marker
    Marker,
}

impl RecordKind {
    /// True for kinds routed to the event-log sink
    pub fn is_eventlog(&self) -> bool {
        matches!(self, RecordKind::Event | RecordKind::Marker)
    }

    fn label(&self) -> &'static str {
        match self {
            RecordKind::Message => "Message",
            RecordKind::Stack => "Stack",
            RecordKind::Event => "Event",
            RecordKind::Marker => "Marker",
        }
    }
}

/// How the emission was ordered relative to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emission {
    /// Performed at the call, in program order (`*_io` variants)
    Sequenced,
    /// Attached to a carried value (pass-through and deferred variants)
    Unsequenced,
    /// Performed before handing back a lifted unit (`*_m` variants)
    Lifted,
}

/// One rendered trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceRecord {
    /// Unique identifier of this emission
    pub id: Uuid,
    /// Timestamp when the emission happened (Unix timestamp)
    pub timestamp: f64,
    pub kind: RecordKind,
    pub flavor: Emission,
    /// Formatter output, emitted verbatim
    pub text: String,
    /// Call stack captured for [`RecordKind::Stack`] records, when available
    pub backtrace: Option<String>,
}

impl TraceRecord {
    pub fn new(kind: RecordKind, flavor: Emission, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: current_timestamp(),
            kind,
            flavor,
            text: text.into(),
            backtrace: None,
        }
    }

    pub fn with_backtrace(mut self, backtrace: Option<String>) -> Self {
        self.backtrace = backtrace;
        self
    }

    /// The text a console sink writes: the rendered text, followed by the call
    /// stack when one was captured.
    pub fn display_text(&self) -> String {
        match &self.backtrace {
            Some(backtrace) => format!("{}\nCallStack (from Backtrace):\n{}", self.text, backtrace),
            None => self.text.clone(),
        }
    }

    /// Get a formatted string summary of the record
    pub fn printable_summary(&self) -> String {
        let nanos = (self.timestamp.fract() * 1e9) as u32;
        let dt = DateTime::from_timestamp(self.timestamp as i64, nanos)
            .unwrap_or_default()
            .with_timezone(&Local);
        let time_str = dt.format("%H:%M:%S%.3f").to_string();

        let mut summary = format!("[{}] {} (id: {})", time_str, self.kind.label(), self.id);
        for line in self.text.lines() {
            summary.push_str(&format!("\n   {}", line));
        }
        if self.backtrace.is_some() {
            summary.push_str("\n   (call stack attached)");
        }

        summary
    }
}

/// Get current timestamp as Unix timestamp (seconds since epoch)
fn current_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}
