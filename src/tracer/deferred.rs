//! Traces attached to the first demand of a value
//!
//! [`Deferred`] mirrors the pass-through and lifted methods of [`Tracer`], but
//! instead of emitting at the call it returns a [`Traced`] cell. The message is
//! rendered and emitted the first time the carried value is demanded through
//! [`Traced::force`], `Deref` or [`Traced::into_inner`]. A cell dropped without
//! being demanded emits nothing.
//!
//! # Concurrent first demand
//!
//! The cell records that it has emitted only after the sink returns. Two threads
//! demanding a shared cell at the same time can therefore both emit, so the same
//! message may appear twice. Sequential demands never emit more than once.
//!
//! ```rust
//! use pretty_trace::{sink::MemorySink, Tracer};
//!
//! let sink = MemorySink::default();
//! let tracer = Tracer::default().with_console_sink(sink.clone());
//!
//! let cell = tracer.deferred().trace_show(&(1, 2), "payload");
//! assert!(sink.is_empty());
//!
//! assert_eq!(*cell, "payload");
//! assert_eq!(*cell, "payload");
//! assert_eq!(sink.texts(), vec!["(1, 2)"]);
//! ```

use super::lift::LiftUnit;
use super::tracer_system::Tracer;
use crate::sink::{Emission, RecordKind};
use std::fmt::{self, Debug};
use std::ops::Deref;
use std::sync::atomic::{AtomicBool, Ordering};

/// Builds [`Traced`] cells for one tracer
#[derive(Debug, Clone)]
pub struct Deferred {
    tracer: Tracer,
}

impl Deferred {
    pub(crate) fn new(tracer: Tracer) -> Self {
        Self { tracer }
    }

    fn cell<T>(&self, kind: RecordKind, flavor: Emission, message: String, value: T) -> Traced<T> {
        Traced {
            value,
            pending: Pending {
                tracer: self.tracer.clone(),
                kind,
                flavor,
                message,
            },
            fired: AtomicBool::new(false),
        }
    }

    pub fn trace<T>(&self, message: &str, value: T) -> Traced<T> {
        self.cell(RecordKind::Message, Emission::Unsequenced, message.to_string(), value)
    }

    /// The `Debug` form of `message` is taken now; rendering waits for the demand.
    pub fn trace_show<M: Debug + ?Sized, T>(&self, message: &M, value: T) -> Traced<T> {
        self.cell(RecordKind::Message, Emission::Unsequenced, format!("{:?}", message), value)
    }

    pub fn trace_id<S: AsRef<str>>(&self, message: S) -> Traced<S> {
        let text = message.as_ref().to_string();
        self.cell(RecordKind::Message, Emission::Unsequenced, text, message)
    }

    pub fn trace_show_id<T: Debug>(&self, value: T) -> Traced<T> {
        let text = format!("{:?}", value);
        self.cell(RecordKind::Message, Emission::Unsequenced, text, value)
    }

    /// Call stack, when available, is captured at the demand.
    pub fn trace_stack<T>(&self, message: &str, value: T) -> Traced<T> {
        self.cell(RecordKind::Stack, Emission::Unsequenced, message.to_string(), value)
    }

    pub fn trace_event<T>(&self, message: &str, value: T) -> Traced<T> {
        self.cell(RecordKind::Event, Emission::Unsequenced, message.to_string(), value)
    }

    pub fn trace_marker<T>(&self, name: &str, value: T) -> Traced<T> {
        self.cell(RecordKind::Marker, Emission::Unsequenced, name.to_string(), value)
    }

    pub fn trace_m<F: LiftUnit>(&self, message: &str) -> Traced<F> {
        self.cell(RecordKind::Message, Emission::Lifted, message.to_string(), F::lift_unit())
    }

    pub fn trace_show_m<F: LiftUnit, M: Debug + ?Sized>(&self, message: &M) -> Traced<F> {
        self.cell(RecordKind::Message, Emission::Lifted, format!("{:?}", message), F::lift_unit())
    }
}

struct Pending {
    tracer: Tracer,
    kind: RecordKind,
    flavor: Emission,
    message: String,
}

/// A carried value whose trace is emitted on first demand
pub struct Traced<T> {
    value: T,
    pending: Pending,
    fired: AtomicBool,
}

impl<T> Traced<T> {
    /// Demand the value, emitting the trace if this is the first demand
    pub fn force(&self) -> &T {
        if !self.fired.load(Ordering::Acquire) {
            let text = self.pending.tracer.render_string(&self.pending.message);
            self.pending.tracer.dispatch(self.pending.kind, self.pending.flavor, text);
            self.fired.store(true, Ordering::Release);
        }
        &self.value
    }

    /// Demand the value and take it out of the cell
    pub fn into_inner(self) -> T {
        self.force();
        self.value
    }

    /// Whether an emission has completed
    pub fn is_forced(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}

impl<T> Deref for Traced<T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.force()
    }
}

impl<T> Debug for Traced<T> {
    /// Does not demand the value
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traced")
            .field("kind", &self.pending.kind)
            .field("forced", &self.is_forced())
            .finish_non_exhaustive()
    }
}
