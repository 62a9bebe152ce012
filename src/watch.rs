//! Headless progression: prints status changes and reveals as plain text.

use anyhow::{Context, Result};
use std::io::{self, Write};

use crate::config::Config;
use crate::demo::{DemoDriver, Progression, Snapshot};
use crate::presenter::{Phase, StepPresenter};
use crate::scheduler::{RevealScheduler, TokioScheduler};
use crate::ui::AgentCard;

fn write_progress<S: RevealScheduler, W: Write>(
    out: &mut W,
    presenter: &StepPresenter<S>,
    snapshot: Snapshot,
) -> io::Result<()> {
    let total = presenter.steps().len();
    match snapshot.phase {
        Phase::InProgress => writeln!(
            out,
            "── {} · step {}/{}",
            snapshot.phase,
            snapshot.step.min(total - 1) + 1,
            total
        ),
        Phase::Completed => writeln!(out, "── {}", snapshot.phase),
    }
}

fn write_step<S: RevealScheduler, W: Write>(
    out: &mut W,
    presenter: &StepPresenter<S>,
    index: usize,
) -> io::Result<()> {
    let step = &presenter.steps()[index];
    let status = presenter.step_status(index);
    writeln!(out, "{} {} [{}]", status.glyph(), step.label, status)
}

fn write_success<W: Write>(out: &mut W, card: &AgentCard) -> io::Result<()> {
    writeln!(out, "🎉 Agent Ready")?;
    writeln!(out, "{} has been created,", card.name)?;
    writeln!(out, "your repo is live and pipeline is running.")?;
    writeln!(out, "View Agent Dashboard → {}", card.view_href)?;
    writeln!(out, "ID: {} · OPERATIONAL", card.id)
}

/// Run the scripted progression to completion, writing to `out`.
pub async fn run_watch<W: Write>(config: &Config, out: &mut W) -> Result<()> {
    let (scheduler, mut reveal_rx) = TokioScheduler::channel();
    let mut presenter = StepPresenter::new(config.steps.clone(), config.stagger(), scheduler)
        .context("Failed to initialize status presenter")?;
    let mut driver = DemoDriver::new(Progression::from_config(config));
    let card = AgentCard::from_config(&config.demo);

    let mut ticker = tokio::time::interval(config.refresh_rate());
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let Some(snapshot) = driver.poll() else {
                    continue;
                };
                presenter.set_progress(snapshot.phase, snapshot.step);
                write_progress(out, &presenter, snapshot)?;

                if snapshot.phase == Phase::Completed {
                    for index in 0..presenter.steps().len() {
                        write_step(out, &presenter, index)?;
                    }
                    write_success(out, &card)?;
                    break;
                }
            }
            Some(event) = reveal_rx.recv() => {
                if presenter.apply_reveal(event) {
                    write_step(out, &presenter, event.index)?;
                }
            }
        }
    }

    presenter.teardown();
    out.flush()?;
    Ok(())
}
