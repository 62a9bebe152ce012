//! Virtual-clock reveal scheduling.

use std::time::Duration;

use super::{RevealEvent, RevealScheduler};

#[derive(Debug, Clone)]
struct Scheduled {
    due: Duration,
    seq: u64,
    event: RevealEvent,
}

/// Scheduler driven by an explicit virtual clock.
///
/// Nothing fires on its own: the owner calls [`ManualScheduler::advance`] and
/// feeds the returned events to the presenter. Useful for deterministic
/// hosts and for tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_seq: u64,
    queue: Vec<Scheduled>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since the scheduler was created
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock forward and return every event now due, ordered by
    /// due time, then by scheduling order.
    pub fn advance(&mut self, by: Duration) -> Vec<RevealEvent> {
        self.now += by;
        let now = self.now;

        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.queue.drain(..).partition(|s| s.due <= now);
        self.queue = rest;

        due.sort_by_key(|s| (s.due, s.seq));
        due.into_iter().map(|s| s.event).collect()
    }

    /// Advance to the latest scheduled due time and return everything.
    pub fn run_until_idle(&mut self) -> Vec<RevealEvent> {
        let last_due = self.queue.iter().map(|s| s.due).max();
        match last_due {
            Some(due) => self.advance(due.saturating_sub(self.now)),
            None => Vec::new(),
        }
    }
}

impl RevealScheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration, event: RevealEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Scheduled {
            due: self.now + delay,
            seq,
            event,
        });
    }

    fn cancel_all(&mut self) {
        self.queue.clear();
    }

    fn pending(&self) -> usize {
        self.queue.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(index: usize) -> RevealEvent {
        RevealEvent {
            generation: 1,
            index,
        }
    }

    #[test]
    fn test_zero_delay_fires_on_zero_advance() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(Duration::ZERO, event(0));
        assert_eq!(scheduler.advance(Duration::ZERO), vec![event(0)]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_advance_only_returns_due_events() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(Duration::from_millis(100), event(1));
        scheduler.schedule(Duration::from_millis(200), event(2));

        assert!(scheduler.advance(Duration::from_millis(99)).is_empty());
        assert_eq!(scheduler.advance(Duration::from_millis(1)), vec![event(1)]);
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scheduler.now(), Duration::from_millis(100));
    }

    #[test]
    fn test_ties_keep_scheduling_order() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(Duration::from_millis(50), event(5));
        scheduler.schedule(Duration::from_millis(10), event(1));
        scheduler.schedule(Duration::from_millis(50), event(3));

        let fired = scheduler.advance(Duration::from_millis(50));
        assert_eq!(fired, vec![event(1), event(5), event(3)]);
    }

    #[test]
    fn test_cancel_all_clears_queue() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(Duration::from_millis(10), event(0));
        scheduler.cancel_all();
        assert!(scheduler.advance(Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn test_run_until_idle() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(Duration::from_millis(360), event(2));
        scheduler.schedule(Duration::from_millis(180), event(1));

        assert_eq!(scheduler.run_until_idle(), vec![event(1), event(2)]);
        assert_eq!(scheduler.now(), Duration::from_millis(360));
        assert!(scheduler.run_until_idle().is_empty());
    }
}
