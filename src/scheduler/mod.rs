//! Deferred reveal scheduling.
//!
//! The presenter never sleeps itself. It hands each reveal to a
//! [`RevealScheduler`] supplied by the host, which delivers the
//! [`RevealEvent`] back after the delay. Two hosts are provided:
//! - [`TokioScheduler`]: real timers on the tokio runtime, events over mpsc
//! - [`ManualScheduler`]: a virtual clock advanced explicitly

mod manual;
mod runtime;

use std::time::Duration;

pub use manual::ManualScheduler;
pub use runtime::TokioScheduler;

/// A reveal callback payload, tagged with the generation that scheduled it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevealEvent {
    pub generation: u64,
    pub index: usize,
}

/// Host facility for running a reveal after a delay
pub trait RevealScheduler {
    /// Deliver `event` back to the presenter's owner after `delay`
    fn schedule(&mut self, delay: Duration, event: RevealEvent);

    /// Drop every reveal that has not been delivered yet
    fn cancel_all(&mut self);

    /// Number of reveals scheduled but not yet delivered
    fn pending(&self) -> usize;
}
