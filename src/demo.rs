//! Scripted deployment progression.
//!
//! Plays the caller role for the presenter: the current step advances on a
//! fixed interval until the last step, then the progression completes after
//! a short delay. Replay restarts the script.

use std::time::Duration;

use tokio::time::Instant;

use crate::config::Config;
use crate::presenter::Phase;

/// Caller-side progress at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub phase: Phase,
    pub step: usize,
}

/// Timing of the scripted progression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progression {
    step_count: usize,
    step_interval: Duration,
    completion_delay: Duration,
}

impl Progression {
    pub fn new(step_count: usize, step_interval: Duration, completion_delay: Duration) -> Self {
        Self {
            step_count: step_count.max(1),
            step_interval,
            completion_delay,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.steps.len(),
            config.step_interval(),
            config.completion_delay(),
        )
    }

    fn last_step(&self) -> usize {
        self.step_count - 1
    }

    /// Elapsed time at which the progression flips to `Completed`.
    ///
    /// The interval keeps ticking once on the last step before the
    /// completion delay starts.
    pub fn completes_after(&self) -> Duration {
        let ticks = u32::try_from(self.step_count).unwrap_or(u32::MAX);
        self.step_interval
            .saturating_mul(ticks)
            .saturating_add(self.completion_delay)
    }

    pub fn snapshot_at(&self, elapsed: Duration) -> Snapshot {
        if elapsed >= self.completes_after() {
            return Snapshot {
                phase: Phase::Completed,
                step: self.last_step(),
            };
        }

        let step = if self.step_interval.is_zero() {
            self.last_step()
        } else {
            let ticks = elapsed.as_millis() / self.step_interval.as_millis().max(1);
            usize::try_from(ticks)
                .unwrap_or(usize::MAX)
                .min(self.last_step())
        };

        Snapshot {
            phase: Phase::InProgress,
            step,
        }
    }
}

/// Tracks a running progression and reports only changes.
#[derive(Debug)]
pub struct DemoDriver {
    progression: Progression,
    started: Instant,
    last: Option<Snapshot>,
}

impl DemoDriver {
    pub fn new(progression: Progression) -> Self {
        Self::started_at(progression, Instant::now())
    }

    pub fn started_at(progression: Progression, started: Instant) -> Self {
        Self {
            progression,
            started,
            last: None,
        }
    }

    /// Snapshot for `now`, or `None` if nothing changed since the last poll.
    pub fn poll_at(&mut self, now: Instant) -> Option<Snapshot> {
        let snapshot = self
            .progression
            .snapshot_at(now.saturating_duration_since(self.started));
        if self.last == Some(snapshot) {
            return None;
        }
        self.last = Some(snapshot);
        Some(snapshot)
    }

    pub fn poll(&mut self) -> Option<Snapshot> {
        self.poll_at(Instant::now())
    }

    /// Restart the script from step 0
    pub fn replay_at(&mut self, now: Instant) {
        self.started = now;
        self.last = None;
        tracing::info!("progression replayed");
    }

    pub fn replay(&mut self) {
        self.replay_at(Instant::now());
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self.last,
            Some(Snapshot {
                phase: Phase::Completed,
                ..
            })
        )
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }
}
