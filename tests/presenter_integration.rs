//! Presenter Integration Tests
//!
//! Drives `StepPresenter` through the public API with both schedulers:
//! - ManualScheduler for exact, virtual-time reveal sequences
//! - TokioScheduler (paused clock) for the real timer path

use std::time::Duration;

use stepwise::presenter::{Phase, PresenterError, Step, StepPresenter, StepStatus};
use stepwise::scheduler::{ManualScheduler, RevealScheduler, TokioScheduler};

const STAGGER: Duration = Duration::from_millis(180);

fn steps(n: usize) -> Vec<Step> {
    (0..n)
        .map(|i| {
            Step::new(
                format!("Step {i}"),
                format!("SUB {i}"),
                format!("step{i}.run()..."),
            )
        })
        .collect()
}

fn manual(n: usize) -> StepPresenter<ManualScheduler> {
    StepPresenter::new(steps(n), STAGGER, ManualScheduler::new()).unwrap()
}

fn advance(presenter: &mut StepPresenter<ManualScheduler>, by: Duration) {
    for event in presenter.scheduler_mut().advance(by) {
        presenter.apply_reveal(event);
    }
}

fn revealed(presenter: &StepPresenter<impl RevealScheduler>) -> Vec<usize> {
    presenter.revealed().iter().copied().collect()
}

#[test]
fn test_empty_step_list_is_a_configuration_error() {
    let err = StepPresenter::new(Vec::new(), STAGGER, ManualScheduler::new())
        .err()
        .unwrap();
    assert!(matches!(err, PresenterError::Configuration(_)));
    assert!(err.to_string().contains("at least one step"));
}

#[test]
fn test_status_law_holds_for_many_lengths() {
    for n in 1..=6 {
        let mut p = manual(n);
        for k in 0..n {
            p.set_progress(Phase::InProgress, k);
            for i in 0..n {
                let status = p.step_status(i);
                if i < k {
                    assert_eq!(status, StepStatus::Done);
                } else if i == k {
                    assert_eq!(status, StepStatus::Active);
                } else {
                    assert_eq!(status, StepStatus::Pending);
                }
            }
        }
    }
}

#[test]
fn test_completed_overrides_partial_reveals() {
    let mut p = manual(4);
    p.set_progress(Phase::InProgress, 1);
    advance(&mut p, Duration::ZERO);
    assert_eq!(revealed(&p), vec![0]);

    p.set_progress(Phase::Completed, 1);
    for i in 0..4 {
        assert!(p.is_revealed(i));
        assert_eq!(p.step_status(i), StepStatus::Done);
    }
}

#[test]
fn test_three_step_scenario() {
    let mut p = manual(3);

    p.set_progress(Phase::InProgress, 0);
    advance(&mut p, STAGGER);
    assert_eq!(revealed(&p), vec![0]);

    p.set_progress(Phase::InProgress, 2);
    advance(&mut p, STAGGER * 2);
    assert_eq!(revealed(&p), vec![0, 1, 2]);
}

#[test]
fn test_second_call_supersedes_first() {
    let mut p = manual(5);
    p.set_progress(Phase::InProgress, 4);
    // Grab the first generation's events before they are cancelled
    let first_events = p.scheduler_mut().run_until_idle();
    assert_eq!(first_events.len(), 5);

    p.set_progress(Phase::InProgress, 1);
    for event in first_events {
        assert!(!p.apply_reveal(event));
    }
    assert!(p.revealed().is_empty());

    advance(&mut p, Duration::from_secs(1));
    assert_eq!(revealed(&p), vec![0, 1]);
}

#[tokio::test(start_paused = true)]
async fn test_tokio_teardown_before_fire() {
    let (scheduler, mut rx) = TokioScheduler::channel();
    let mut p = StepPresenter::new(steps(3), STAGGER, scheduler).unwrap();

    p.set_progress(Phase::InProgress, 2);
    p.teardown();

    tokio::time::sleep(Duration::from_secs(1)).await;
    while let Ok(event) = rx.try_recv() {
        assert!(!p.apply_reveal(event));
    }
    assert!(p.revealed().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_tokio_reveals_in_index_order() {
    let (scheduler, mut rx) = TokioScheduler::channel();
    let mut p = StepPresenter::new(steps(3), STAGGER, scheduler).unwrap();
    p.set_progress(Phase::InProgress, 2);

    let mut order = Vec::new();
    while order.len() < 3 {
        let event = rx.recv().await.unwrap();
        assert!(p.apply_reveal(event));
        order.push(event.index);
    }
    assert_eq!(order, vec![0, 1, 2]);
    assert_eq!(revealed(&p), vec![0, 1, 2]);
}

#[tokio::test(start_paused = true)]
async fn test_tokio_completed_needs_no_timers() {
    let (scheduler, _rx) = TokioScheduler::channel();
    let mut p = StepPresenter::new(steps(3), STAGGER, scheduler).unwrap();
    p.set_progress(Phase::InProgress, 2);
    p.set_progress(Phase::Completed, 2);

    assert_eq!(p.scheduler().pending(), 0);
    assert!((0..3).all(|i| p.is_revealed(i)));
}
