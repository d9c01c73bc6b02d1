//! Lifting unit into an effect context
//!
//! The `*_m` trace variants hand back a trivially successful `()` wrapped in
//! whatever context the caller is sequencing, so a trace can sit between `?`
//! steps or `.await` points without changing their types.

use std::future::Future;
use std::pin::Pin;
use std::task::Poll;

/// A context that can wrap a successful `()`
pub trait LiftUnit {
    fn lift_unit() -> Self;
}

impl LiftUnit for () {
    fn lift_unit() -> Self {}
}

impl LiftUnit for Option<()> {
    fn lift_unit() -> Self {
        Some(())
    }
}

impl<E> LiftUnit for Result<(), E> {
    fn lift_unit() -> Self {
        Ok(())
    }
}

impl LiftUnit for Vec<()> {
    fn lift_unit() -> Self {
        vec![()]
    }
}

impl LiftUnit for Poll<()> {
    fn lift_unit() -> Self {
        Poll::Ready(())
    }
}

impl LiftUnit for std::future::Ready<()> {
    fn lift_unit() -> Self {
        std::future::ready(())
    }
}

impl LiftUnit for futures::future::Ready<()> {
    fn lift_unit() -> Self {
        futures::future::ready(())
    }
}

impl LiftUnit for Pin<Box<dyn Future<Output = ()> + Send>> {
    fn lift_unit() -> Self {
        Box::pin(std::future::ready(()))
    }
}
