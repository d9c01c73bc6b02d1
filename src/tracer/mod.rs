//! Tracer: the trace entry points
//!
//! # Architecture
//!
//! - **Tracer**: renders a message with its formatter and routes the record to its
//!   console or event-log sink
//! - **Deferred / Traced**: the same entry points with emission attached to the
//!   first demand of the carried value
//! - **LiftUnit**: contexts the `*_m` variants can return `()` in
//! - **global**: the process-wide tracer behind the free functions
//!
//! # Variants
//!
//! | Method | Message | Emission | Returns |
//! |---|---|---|---|
//! | `trace` / `trace_show` | string / `Debug` value | at the call | carried value |
//! | `trace_id` / `trace_show_id` | string / `Debug` value | at the call | the message |
//! | `trace_io` | string | sequenced | `()` |
//! | `trace_m` / `trace_show_m` | string / `Debug` value | before lifting | `F::lift_unit()` |
//! | `trace_stack` | string | at the call, plus call stack | carried value |
//! | `trace_event` / `trace_event_io` | string | event log | carried value / `()` |
//! | `trace_marker` / `trace_marker_io` | marker name | event log | carried value / `()` |

pub mod deferred;
pub mod global;
pub mod lift;
pub mod stack;
pub mod tracer_system;

pub use deferred::{Deferred, Traced};
pub use global::{global_tracer, set_global_tracer};
pub use lift::LiftUnit;
pub use stack::stack_traces_available;
pub use tracer_system::Tracer;
