//! Stepped status presenter.
//!
//! Holds a fixed, ordered list of steps and the caller-supplied progress
//! (phase + current step). Derives a per-step render status and drives a
//! staggered reveal of the steps through a [`RevealScheduler`].
//!
//! Stale reveals are rejected with a generation counter: every call to
//! [`StepPresenter::set_progress`], [`StepPresenter::reset`] or
//! [`StepPresenter::teardown`] bumps the generation, and a reveal carrying an
//! older generation is a no-op.
//!
//! [`RevealScheduler`]: crate::scheduler::RevealScheduler

mod state;
mod status;
mod step;

use thiserror::Error;

pub use state::StepPresenter;
pub use status::{Phase, StepStatus};
pub use step::{default_steps, Step};

/// Errors raised by the presenter
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresenterError {
    #[error("invalid presenter configuration: {0}")]
    Configuration(String),
}
