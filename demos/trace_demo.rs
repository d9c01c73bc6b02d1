//! Pretty tracing demonstration
//!
//! Traces a few values through a small computation: pass-through traces, a
//! sequenced trace, a lifted trace inside an `Option` chain, event-log traces and
//! a deferred trace that only fires when its value is used.
//!
//! # Running the example
//!
//! ```bash
//! RUST_LOG=pretty_trace::eventlog=trace cargo run --example trace_demo
//! ```

use pretty_trace::formatter::OutputOptions;
use pretty_trace::{
    pretty_trace, pretty_trace_event, pretty_trace_io, pretty_trace_marker_io, pretty_trace_show_id,
    set_global_tracer, Tracer,
};
use std::collections::BTreeMap;

#[derive(Debug)]
#[allow(dead_code)]
struct Order {
    id: u32,
    customer: String,
    lines: Vec<(String, u32)>,
}

fn parse_quantity(tracer: &Tracer, raw: &str) -> Option<u32> {
    tracer.trace_m::<Option<()>>(raw)?;
    raw.trim().parse().ok()
}

fn main() -> anyhow::Result<()> {
    pretty_trace::logging::init()?;

    set_global_tracer(Tracer::default().with_options(OutputOptions::from_json(r#"{"page_width": 60}"#)?));

    pretty_trace_marker_io("demo-start");

    let order = pretty_trace_show_id(Order {
        id: 7,
        customer: "Ada Lovelace".to_string(),
        lines: vec![
            ("analytical engine".to_string(), 1),
            ("punched cards".to_string(), 400),
        ],
    });

    let totals: BTreeMap<_, _> = order.lines.iter().map(|(item, qty)| (item.as_str(), *qty)).collect();
    let totals = pretty_trace("computed totals", totals);
    pretty_trace_io(&format!("{:?}", totals));

    let tracer = pretty_trace::global_tracer();
    let quantity = parse_quantity(&tracer, " 12 ");
    println!("parsed quantity: {:?}", quantity);

    let lazy = tracer.deferred().trace_show(&order.id, order.customer.len());
    println!("deferred trace created, nothing emitted yet");
    println!("customer name length: {}", *lazy);

    let id = pretty_trace_event("order processed", order.id);
    pretty_trace_marker_io("demo-end");
    println!("done with order {}", id);

    Ok(())
}
