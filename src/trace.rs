//! Free trace functions using the process-wide tracer
//!
//! Each function forwards to the method of the same meaning on
//! [`global_tracer()`](crate::tracer::global_tracer). By default that tracer
//! pretty-prints with [`PrettyFormatter`](crate::formatter::PrettyFormatter),
//! writes messages to standard error and sends events and markers to `tracing`.
//!
//! Every function here emits exactly once, at the call, before it returns.
//! Nothing waits for the returned value to be used. For traces that fire only
//! when their value is first demanded, use [`deferred()`] and
//! [`Traced`](crate::tracer::Traced).
//!
//! ```rust
//! use pretty_trace::{pretty_trace_show_id, pretty_trace};
//!
//! let total: i32 = pretty_trace_show_id(vec![1, 2, 3]).iter().sum();
//! let total = pretty_trace("summed", total);
//! assert_eq!(total, 6);
//! ```

use crate::tracer::{global_tracer, Deferred, LiftUnit};
use std::fmt::Debug;

/// Emit `message` and return `value`
pub fn pretty_trace<T>(message: &str, value: T) -> T {
    global_tracer().trace(message, value)
}

/// Emit the pretty-printed `Debug` form of `message` and return `value`
pub fn pretty_trace_show<M: Debug + ?Sized, T>(message: &M, value: T) -> T {
    global_tracer().trace_show(message, value)
}

/// Emit `message` and return it
pub fn pretty_trace_id<S: AsRef<str>>(message: S) -> S {
    global_tracer().trace_id(message)
}

/// Emit the pretty-printed `Debug` form of `value` and return it
pub fn pretty_trace_show_id<T: Debug>(value: T) -> T {
    global_tracer().trace_show_id(value)
}

/// Emit the string `f` derives from `value`, then return `value`
pub fn pretty_trace_with<T>(f: impl FnOnce(&T) -> String, value: T) -> T {
    global_tracer().trace_with(f, value)
}

/// Emit the pretty-printed result of `f(&value)`, then return `value`
pub fn pretty_trace_show_with<T, M: Debug>(f: impl FnOnce(&T) -> M, value: T) -> T {
    global_tracer().trace_show_with(f, value)
}

/// Emit `message` as a sequenced step
pub fn pretty_trace_io(message: &str) {
    global_tracer().trace_io(message)
}

/// Emit `message` and return the unit of the context `F`, e.g. `Some(())`
pub fn pretty_trace_m<F: LiftUnit>(message: &str) -> F {
    global_tracer().trace_m(message)
}

/// Emit the pretty-printed `message` and return the unit of the context `F`
pub fn pretty_trace_show_m<F: LiftUnit, M: Debug + ?Sized>(message: &M) -> F {
    global_tracer().trace_show_m(message)
}

/// Like [`pretty_trace`], with the call stack attached when backtraces are enabled
pub fn pretty_trace_stack<T>(message: &str, value: T) -> T {
    global_tracer().trace_stack(message, value)
}

/// Send `message` to the event log and return `value`
pub fn pretty_trace_event<T>(message: &str, value: T) -> T {
    global_tracer().trace_event(message, value)
}

/// Send `message` to the event log as a sequenced step
pub fn pretty_trace_event_io(message: &str) {
    global_tracer().trace_event_io(message)
}

/// Send the marker `name` to the event log and return `value`
pub fn pretty_trace_marker<T>(name: &str, value: T) -> T {
    global_tracer().trace_marker(name, value)
}

/// Send the marker `name` to the event log as a sequenced step
pub fn pretty_trace_marker_io(name: &str) {
    global_tracer().trace_marker_io(name)
}

/// Deferred variants bound to the current process-wide tracer
pub fn deferred() -> Deferred {
    global_tracer().deferred()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{Emission, MemorySink, RecordKind};
    use crate::tracer::{set_global_tracer, Tracer};

    // The only test in the crate that touches the global tracer.
    #[test]
    fn test_free_functions_use_global_tracer() {
        let console = MemorySink::default();
        let eventlog = MemorySink::default();
        set_global_tracer(
            Tracer::default()
                .with_console_sink(console.clone())
                .with_eventlog_sink(eventlog.clone())
                .with_stack_traces(false),
        );

        assert_eq!(pretty_trace_show_id(vec![1, 2, 3]), vec![1, 2, 3]);
        assert_eq!(pretty_trace_id("hello"), "hello");
        assert_eq!(pretty_trace("msg", 5u8), 5);
        assert_eq!(pretty_trace_show(&Some(1), 'c'), 'c');
        assert_eq!(pretty_trace_with(|n: &i32| format!("n={}", n), 4), 4);
        assert_eq!(pretty_trace_show_with(|n: &i32| n * 2, 4), 4);
        pretty_trace_io("io");
        assert_eq!(pretty_trace_m::<Option<()>>("m"), Some(()));
        assert_eq!(pretty_trace_show_m::<Result<(), ()>, _>(&[0u8; 0]), Ok(()));
        assert_eq!(pretty_trace_stack("stack", 1), 1);
        assert_eq!(*deferred().trace("deferred", 2), 2);

        assert_eq!(
            console.texts(),
            vec!["[1, 2, 3]", "hello", "msg", "Some(1)", "n=4", "8", "io", "m", "[]", "stack", "deferred"]
        );
        let flavors: Vec<_> = console.records().iter().map(|r| r.flavor).collect();
        assert_eq!(flavors[6], Emission::Sequenced);
        assert_eq!(flavors[7], Emission::Lifted);
        assert_eq!(console.records()[9].kind, RecordKind::Stack);

        assert_eq!(pretty_trace_event("event", "e"), "e");
        pretty_trace_event_io("event io");
        assert_eq!(pretty_trace_marker("marker", 3.0), 3.0);
        pretty_trace_marker_io("marker io");

        assert_eq!(eventlog.texts(), vec!["event", "event io", "marker", "marker io"]);
        assert_eq!(eventlog.count_records(Some(RecordKind::Marker), None), 2);

        // Emitted at the call even though the result is discarded.
        let _ = pretty_trace("eager", 0);
        assert_eq!(console.texts().last().map(String::as_str), Some("eager"));
        assert_eq!(console.records().last().map(|r| r.flavor), Some(Emission::Unsequenced));
    }
}
