use std::collections::BTreeSet;
use std::time::Duration;

use tracing::{debug, trace};

use super::{Phase, PresenterError, Step, StepStatus};
use crate::scheduler::{RevealEvent, RevealScheduler};

/// Holds the step list and presentation state for one status card.
///
/// All mutation goes through `&mut self`; the owner is expected to run on a
/// single logical thread and feed delivered [`RevealEvent`]s back through
/// [`StepPresenter::apply_reveal`].
pub struct StepPresenter<S: RevealScheduler> {
    steps: Vec<Step>,
    stagger: Duration,
    scheduler: S,
    phase: Phase,
    current_step: usize,
    /// Indices already made visible. Only grows until `reset`.
    revealed: BTreeSet<usize>,
    /// Bumped on every progress change, reset and teardown
    generation: u64,
    torn_down: bool,
}

impl<S: RevealScheduler> StepPresenter<S> {
    /// Create a presenter over `steps`, revealing them `stagger` apart.
    pub fn new(
        steps: Vec<Step>,
        stagger: Duration,
        scheduler: S,
    ) -> Result<Self, PresenterError> {
        if steps.is_empty() {
            return Err(PresenterError::Configuration(
                "step list must contain at least one step".to_string(),
            ));
        }

        debug!(
            steps = steps.len(),
            stagger_ms = stagger.as_millis() as u64,
            "presenter initialized"
        );

        Ok(Self {
            steps,
            stagger,
            scheduler,
            phase: Phase::InProgress,
            current_step: 0,
            revealed: BTreeSet::new(),
            generation: 0,
            torn_down: false,
        })
    }

    /// Inform the presenter of the caller's current progress.
    ///
    /// `Completed` reveals every step at once. `InProgress` schedules a
    /// reveal for each not-yet-revealed step up to and including
    /// `current_step`, delayed by `index * stagger`. Either way, reveals from
    /// earlier calls are invalidated.
    pub fn set_progress(&mut self, phase: Phase, current_step: usize) {
        if self.torn_down {
            debug!(%phase, current_step, "ignoring progress after teardown");
            return;
        }

        self.generation += 1;
        self.phase = phase;
        self.current_step = current_step;
        self.scheduler.cancel_all();

        match phase {
            Phase::Completed => {
                self.revealed.extend(0..self.steps.len());
                debug!(generation = self.generation, "progression completed");
            }
            Phase::InProgress => {
                let last = current_step.min(self.steps.len() - 1);
                let mut scheduled = 0usize;
                for index in 0..=last {
                    if self.revealed.contains(&index) {
                        continue;
                    }
                    let factor = u32::try_from(index).unwrap_or(u32::MAX);
                    self.scheduler.schedule(
                        self.stagger.saturating_mul(factor),
                        RevealEvent {
                            generation: self.generation,
                            index,
                        },
                    );
                    scheduled += 1;
                }
                debug!(
                    generation = self.generation,
                    current_step,
                    scheduled,
                    "progress updated"
                );
            }
        }
    }

    /// Apply a delivered reveal. Returns `true` if it made a step visible.
    ///
    /// Events from a superseded generation, or delivered after teardown, are
    /// ignored.
    pub fn apply_reveal(&mut self, event: RevealEvent) -> bool {
        if self.torn_down || event.generation != self.generation {
            trace!(
                event_generation = event.generation,
                generation = self.generation,
                index = event.index,
                "stale reveal dropped"
            );
            return false;
        }
        if event.index >= self.steps.len() {
            return false;
        }
        self.revealed.insert(event.index)
    }

    /// Status of the step at `index` for rendering
    pub fn step_status(&self, index: usize) -> StepStatus {
        StepStatus::derive(self.phase, self.current_step, index)
    }

    /// Whether the step at `index` should be visible
    pub fn is_revealed(&self, index: usize) -> bool {
        self.phase == Phase::Completed || self.revealed.contains(&index)
    }

    /// Start over: step 0, nothing revealed, pending reveals invalidated.
    /// Also revives a torn-down presenter.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.scheduler.cancel_all();
        self.phase = Phase::InProgress;
        self.current_step = 0;
        self.revealed.clear();
        self.torn_down = false;
        debug!(generation = self.generation, "presenter reset");
    }

    /// Cancel every outstanding reveal. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.generation += 1;
        self.scheduler.cancel_all();
        self.torn_down = true;
        debug!(generation = self.generation, "presenter torn down");
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    /// Indices revealed so far. Ignores the `Completed` override; use
    /// [`StepPresenter::is_revealed`] for rendering decisions.
    pub fn revealed(&self) -> &BTreeSet<usize> {
        &self.revealed
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn stagger(&self) -> Duration {
        self.stagger
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }
}

impl<S: RevealScheduler> Drop for StepPresenter<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
