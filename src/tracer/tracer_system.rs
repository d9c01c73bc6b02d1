//! The tracer: formatter plus console and event-log sinks
//!
//! This module provides the central type every trace entry point goes through. It
//! renders the message, wraps it in a [`TraceRecord`] and routes the record to the
//! console sink (messages, stack traces) or the event-log sink (events, markers).

use super::deferred::Deferred;
use super::lift::LiftUnit;
use super::stack;
use crate::formatter::{Formatter, OutputOptions, PrettyFormatter};
use crate::sink::{Emission, RecordKind, TraceRecord, TraceSink, TracingEventSink, WriterSink};
use std::fmt::{self, Debug};
use std::sync::Arc;

/// Renders messages and emits them to its sinks
///
/// Cloning is cheap: clones share the formatter and sinks.
///
/// # Emission timing
///
/// Pass-through methods (`trace`, `trace_show`, `trace_id`, ...) render and emit
/// exactly once, at the call, before returning the carried value. Use
/// [`Tracer::deferred`] to attach the emission to the first demand of the value
/// instead.
#[derive(Clone)]
pub struct Tracer {
    formatter: Arc<dyn Formatter>,
    console: Arc<dyn TraceSink>,
    eventlog: Arc<dyn TraceSink>,
    stack_traces: bool,
}

impl Tracer {
    /// Create a tracer
    ///
    /// # Arguments
    ///
    /// * `formatter` - Renders every message
    /// * `console` - Receives message and stack records
    /// * `eventlog` - Receives event and marker records
    pub fn new(
        formatter: impl Formatter + 'static,
        console: impl TraceSink + 'static,
        eventlog: impl TraceSink + 'static,
    ) -> Self {
        Self {
            formatter: Arc::new(formatter),
            console: Arc::new(console),
            eventlog: Arc::new(eventlog),
            stack_traces: stack::stack_traces_available(),
        }
    }

    pub fn with_formatter(mut self, formatter: impl Formatter + 'static) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    /// Use a [`PrettyFormatter`] with the given options
    pub fn with_options(self, options: OutputOptions) -> Self {
        self.with_formatter(PrettyFormatter::new(options))
    }

    pub fn with_console_sink(mut self, sink: impl TraceSink + 'static) -> Self {
        self.console = Arc::new(sink);
        self
    }

    pub fn with_eventlog_sink(mut self, sink: impl TraceSink + 'static) -> Self {
        self.eventlog = Arc::new(sink);
        self
    }

    /// Override the process-wide call stack capability for this tracer
    pub fn with_stack_traces(mut self, enabled: bool) -> Self {
        self.stack_traces = enabled;
        self
    }

    pub fn stack_traces(&self) -> bool {
        self.stack_traces
    }

    /// Handle whose methods attach emission to the first demand of the carried value
    pub fn deferred(&self) -> Deferred {
        Deferred::new(self.clone())
    }

    // ---- value-to-text bridge ----

    /// Render text with this tracer's formatter
    pub fn render_string(&self, text: &str) -> String {
        self.formatter.render(text)
    }

    /// Render the `Debug` form of a value with this tracer's formatter
    pub fn render_value<M: Debug + ?Sized>(&self, value: &M) -> String {
        self.render_string(&format!("{:?}", value))
    }

    // ---- emission primitives ----

    pub(crate) fn dispatch(&self, kind: RecordKind, flavor: Emission, text: String) {
        let backtrace = if kind == RecordKind::Stack && self.stack_traces {
            stack::capture()
        } else {
            None
        };
        let record = TraceRecord::new(kind, flavor, text).with_backtrace(backtrace);

        if kind.is_eventlog() {
            self.eventlog.emit(&record);
        } else {
            self.console.emit(&record);
        }
    }

    fn emit_sync(&self, kind: RecordKind, text: String) {
        self.dispatch(kind, Emission::Sequenced, text);
    }

    fn emit_pure<T>(&self, kind: RecordKind, text: String, result: T) -> T {
        self.dispatch(kind, Emission::Unsequenced, text);
        result
    }

    fn emit_applicative<F: LiftUnit>(&self, kind: RecordKind, text: String) -> F {
        self.dispatch(kind, Emission::Lifted, text);
        F::lift_unit()
    }

    // ---- pass-through family ----

    /// Emit the rendered message, return `value` unchanged
    pub fn trace<T>(&self, message: &str, value: T) -> T {
        self.emit_pure(RecordKind::Message, self.render_string(message), value)
    }

    /// Emit the rendered `Debug` form of `message`, return `value` unchanged
    pub fn trace_show<M: Debug + ?Sized, T>(&self, message: &M, value: T) -> T {
        self.emit_pure(RecordKind::Message, self.render_value(message), value)
    }

    /// Emit the rendered message and return the message itself
    pub fn trace_id<S: AsRef<str>>(&self, message: S) -> S {
        let text = self.render_string(message.as_ref());
        self.emit_pure(RecordKind::Message, text, message)
    }

    /// Emit the rendered `Debug` form of `value` and return `value`
    pub fn trace_show_id<T: Debug>(&self, value: T) -> T {
        let text = self.render_value(&value);
        self.emit_pure(RecordKind::Message, text, value)
    }

    /// Emit `f(&value)`, rendered, and return `value`
    pub fn trace_with<T>(&self, f: impl FnOnce(&T) -> String, value: T) -> T {
        let text = self.render_string(&f(&value));
        self.emit_pure(RecordKind::Message, text, value)
    }

    /// Emit the `Debug` form of `f(&value)`, rendered, and return `value`
    pub fn trace_show_with<T, M: Debug>(&self, f: impl FnOnce(&T) -> M, value: T) -> T {
        let text = self.render_value(&f(&value));
        self.emit_pure(RecordKind::Message, text, value)
    }

    /// Like [`trace`](Self::trace), with the call stack attached when available
    pub fn trace_stack<T>(&self, message: &str, value: T) -> T {
        self.emit_pure(RecordKind::Stack, self.render_string(message), value)
    }

    /// Emit the rendered message to the event log, return `value` unchanged
    pub fn trace_event<T>(&self, message: &str, value: T) -> T {
        self.emit_pure(RecordKind::Event, self.render_string(message), value)
    }

    /// Emit a named marker to the event log, return `value` unchanged
    pub fn trace_marker<T>(&self, name: &str, value: T) -> T {
        self.emit_pure(RecordKind::Marker, self.render_string(name), value)
    }

    // ---- sequenced family ----

    /// Emit the rendered message now, in program order
    pub fn trace_io(&self, message: &str) {
        self.emit_sync(RecordKind::Message, self.render_string(message));
    }

    pub fn trace_event_io(&self, message: &str) {
        self.emit_sync(RecordKind::Event, self.render_string(message));
    }

    pub fn trace_marker_io(&self, name: &str) {
        self.emit_sync(RecordKind::Marker, self.render_string(name));
    }

    // ---- lifted family ----

    /// Emit the rendered message and return `()` lifted into `F`
    ///
    /// ```rust
    /// use pretty_trace::{sink::NullSink, Tracer};
    ///
    /// fn halve(tracer: &Tracer, n: u32) -> Option<u32> {
    ///     tracer.trace_m::<Option<()>>("halving")?;
    ///     n.checked_div(2)
    /// }
    ///
    /// let tracer = Tracer::default().with_console_sink(NullSink);
    /// assert_eq!(halve(&tracer, 8), Some(4));
    /// ```
    pub fn trace_m<F: LiftUnit>(&self, message: &str) -> F {
        self.emit_applicative(RecordKind::Message, self.render_string(message))
    }

    /// Emit the rendered `Debug` form of `message` and return `()` lifted into `F`
    pub fn trace_show_m<F: LiftUnit, M: Debug + ?Sized>(&self, message: &M) -> F {
        self.emit_applicative(RecordKind::Message, self.render_value(message))
    }
}

impl Default for Tracer {
    /// Pretty formatter with default options, standard error for messages and
    /// `tracing` for the event log
    fn default() -> Self {
        Self::new(PrettyFormatter::default(), WriterSink::stderr(), TracingEventSink::new())
    }
}

impl Debug for Tracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracer")
            .field("stack_traces", &self.stack_traces)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{MemorySink, NullSink};

    fn capturing() -> (Tracer, MemorySink, MemorySink) {
        let console = MemorySink::default();
        let eventlog = MemorySink::default();
        let tracer = Tracer::default()
            .with_console_sink(console.clone())
            .with_eventlog_sink(eventlog.clone());
        (tracer, console, eventlog)
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Config {
        name: String,
        retries: u32,
    }

    #[test]
    fn test_trace_returns_carried_value() {
        let (tracer, console, _) = capturing();
        let value = tracer.trace("checkpoint", vec![1, 2, 3]);

        assert_eq!(value, vec![1, 2, 3]);
        assert_eq!(console.texts(), vec!["checkpoint"]);
        assert_eq!(console.records()[0].flavor, Emission::Unsequenced);
    }

    #[test]
    fn test_carried_value_is_moved_not_rebuilt() {
        let (tracer, _, _) = capturing();
        let original = Box::new(42);
        let address = &*original as *const i32;

        let returned = tracer.trace("boxed", original);
        assert_eq!(&*returned as *const i32, address);
    }

    #[test]
    fn test_trace_show_renders_debug_form() {
        let (tracer, console, _) = capturing();
        let config = Config {
            name: "db".to_string(),
            retries: 3,
        };
        let result = tracer.trace_show(&config, "ok");

        assert_eq!(result, "ok");
        assert_eq!(console.texts(), vec!["Config { name: \"db\", retries: 3 }"]);
    }

    #[test]
    fn test_trace_show_id_returns_value_and_emits_rendering() {
        let (tracer, console, _) = capturing();
        let value = tracer.trace_show_id(vec![1, 2, 3]);

        assert_eq!(value, vec![1, 2, 3]);
        let text = &console.texts()[0];
        let positions: Vec<_> = ['1', '2', '3'].iter().map(|c| text.find(*c).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(text, &tracer.render_value(&vec![1, 2, 3]));
    }

    #[test]
    fn test_trace_id_returns_message() {
        let (tracer, console, _) = capturing();
        let owned = tracer.trace_id(String::from("hello"));
        let borrowed = tracer.trace_id("hello");

        assert_eq!(owned, "hello");
        assert_eq!(borrowed, "hello");
        assert_eq!(console.texts(), vec!["hello", "hello"]);
    }

    #[test]
    fn test_trace_with_functions() {
        let (tracer, console, _) = capturing();
        let value = tracer.trace_with(|v: &Vec<i32>| format!("len={}", v.len()), vec![7, 8]);
        let value = tracer.trace_show_with(|v: &Vec<i32>| v.iter().sum::<i32>(), value);

        assert_eq!(value, vec![7, 8]);
        assert_eq!(console.texts(), vec!["len=2", "15"]);
    }

    #[test]
    fn test_empty_message_still_emits_and_returns() {
        let (tracer, console, _) = capturing();
        let value = tracer.trace("", 5);

        assert_eq!(value, 5);
        assert_eq!(console.texts(), vec![""]);
        assert_eq!(tracer.trace_show_id(""), "");
    }

    #[test]
    fn test_long_value_is_rendered_multi_line() {
        let (tracer, console, _) = capturing();
        let tracer = tracer.with_options(OutputOptions {
            page_width: 20,
            ..OutputOptions::default()
        });
        tracer.trace_show_id((1..=8).collect::<Vec<_>>());

        assert_eq!(
            console.texts()[0],
            "[\n    1,\n    2,\n    3,\n    4,\n    5,\n    6,\n    7,\n    8,\n]"
        );
    }

    #[derive(Debug)]
    #[allow(dead_code)]
    struct Node {
        value: u32,
        next: Option<Box<Node>>,
    }

    #[test]
    fn test_deeply_nested_value_is_traced() {
        // `{:?}` on the list itself recurses once per node, so give the
        // thread the usual main-thread stack.
        let handle = std::thread::Builder::new()
            .stack_size(8 * 1024 * 1024)
            .spawn(|| {
                let (tracer, console, _) = capturing();
                let mut list = None;
                for value in 0..1000 {
                    list = Some(Box::new(Node { value, next: list }));
                }

                let list = tracer.trace_show_id(list);
                assert_eq!(list.as_ref().map(|node| node.value), Some(999));
                let text = &console.texts()[0];
                assert!(text.starts_with("Some(\n"));
                assert_eq!(text.matches("Node {").count(), 1000);
            })
            .unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn test_custom_formatter_output_is_emitted_verbatim() {
        let (tracer, console, _) = capturing();
        let tracer = tracer.with_formatter(|text: &str| format!(">> {}", text));
        tracer.trace_io("raw");

        assert_eq!(console.texts(), vec![">> raw"]);
    }

    #[test]
    fn test_sequenced_emissions_keep_program_order() {
        let (tracer, console, _) = capturing();
        for i in 0..5 {
            tracer.trace_io(&format!("step {}", i));
        }

        let expected: Vec<_> = (0..5).map(|i| format!("step {}", i)).collect();
        assert_eq!(console.texts(), expected);
        assert!(console.records().iter().all(|r| r.flavor == Emission::Sequenced));
    }

    #[test]
    fn test_trace_m_in_option_context() {
        let (tracer, console, _) = capturing();

        let run = || -> Option<u32> {
            tracer.trace_m::<Option<()>>("first")?;
            tracer.trace_m::<Option<()>>("second")?;
            Some(10)
        };

        assert_eq!(run(), Some(10));
        assert_eq!(console.texts(), vec!["first", "second"]);
        assert!(console.records().iter().all(|r| r.flavor == Emission::Lifted));
    }

    #[test]
    fn test_trace_m_in_result_context() {
        let (tracer, console, _) = capturing();

        let run = || -> Result<&'static str, String> {
            tracer.trace_show_m::<Result<(), String>, _>(&[1, 2])?;
            Ok("done")
        };

        assert_eq!(run(), Ok("done"));
        assert_eq!(console.texts(), vec!["[1, 2]"]);
    }

    #[tokio::test]
    async fn test_trace_m_in_async_context() {
        let (tracer, console, _) = capturing();

        tracer.trace_m::<futures::future::Ready<()>>("before").await;
        let value = async { 21 * 2 }.await;
        tracer
            .trace_show_m::<std::pin::Pin<Box<dyn std::future::Future<Output = ()> + Send>>, _>(&value)
            .await;

        assert_eq!(console.texts(), vec!["before", "42"]);
    }

    #[test]
    fn test_event_and_marker_route_to_eventlog() {
        let (tracer, console, eventlog) = capturing();

        let a = tracer.trace_event("request started", 1);
        tracer.trace_event_io("request finished");
        let b = tracer.trace_marker("phase-1", 2);
        tracer.trace_marker_io("phase-2");

        assert_eq!((a, b), (1, 2));
        assert!(console.is_empty());
        assert_eq!(
            eventlog.texts(),
            vec!["request started", "request finished", "phase-1", "phase-2"]
        );
        assert_eq!(eventlog.count_records(Some(RecordKind::Marker), None), 2);

        let flavors: Vec<_> = eventlog.records().iter().map(|r| r.flavor).collect();
        assert_eq!(
            flavors,
            vec![Emission::Unsequenced, Emission::Sequenced, Emission::Unsequenced, Emission::Sequenced]
        );
    }

    #[test]
    fn test_trace_stack_without_capability_matches_plain_trace() {
        let (tracer, console, _) = capturing();
        let tracer = tracer.with_stack_traces(false);

        let value = tracer.trace_stack("where am I", 'x');

        assert_eq!(value, 'x');
        let record = &console.records()[0];
        assert_eq!(record.kind, RecordKind::Stack);
        assert_eq!(record.text, "where am I");
        assert!(record.backtrace.is_none());
        assert_eq!(record.display_text(), "where am I");
    }

    #[test]
    fn test_trace_stack_with_capability_keeps_text_intact() {
        let (tracer, console, _) = capturing();
        let tracer = tracer.with_stack_traces(true);

        let value = tracer.trace_stack("where am I", 7);

        assert_eq!(value, 7);
        let record = &console.records()[0];
        assert_eq!(record.text, "where am I");
        assert!(record.display_text().starts_with("where am I"));
    }

    #[test]
    fn test_null_sinks_still_return_values() {
        let tracer = Tracer::new(PrettyFormatter::default(), NullSink, NullSink);
        assert_eq!(tracer.trace_event("ignored", "kept"), "kept");
        assert_eq!(tracer.trace_show_id(3.5), 3.5);
    }

    #[test]
    fn test_debug_does_not_expose_sinks() {
        let tracer = Tracer::default().with_stack_traces(false);
        assert_eq!(format!("{:?}", tracer), "Tracer { stack_traces: false, .. }");
    }
}
