//! Pretty-printed debug tracing
//!
//! Trace functions that pretty-print a value or string to standard error (or the
//! event log, or a sink of your own) and hand the traced value back unchanged, so
//! they can be dropped into any expression.
//!
//! ```rust
//! use pretty_trace::{sink::MemorySink, Tracer};
//!
//! let sink = MemorySink::default();
//! let tracer = Tracer::default().with_console_sink(sink.clone());
//!
//! let scores = tracer.trace_show_id(vec![("ann", 3), ("bob", 5)]);
//! assert_eq!(scores.len(), 2);
//! assert_eq!(sink.texts(), vec![r#"[("ann", 3), ("bob", 5)]"#]);
//! ```

pub mod error;
pub mod formatter;
pub mod logging;
pub mod sink;
pub mod trace;
pub mod tracer;

pub use error::{PrettyTraceError, Result};
pub use formatter::{pretty_print, pretty_print_string, pretty_show, pretty_string};
pub use trace::*;
pub use tracer::{global_tracer, set_global_tracer, Deferred, LiftUnit, Traced, Tracer};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::error::{PrettyTraceError, Result};
    pub use crate::formatter::{Formatter, OutputOptions, PrettyFormatter, StringStyle};
    pub use crate::sink::{MemorySink, TraceRecord, TraceSink};
    pub use crate::trace::*;
    pub use crate::tracer::{LiftUnit, Traced, Tracer};
}
