//! Stepwise - staged agent deployment status for the terminal
//!
//! The core is [`presenter::StepPresenter`], which reveals an ordered list of
//! steps on a fixed stagger through a host-supplied
//! [`scheduler::RevealScheduler`]. The remaining modules wire it into a
//! ratatui dashboard and a headless `watch` mode.

pub mod app;
pub mod config;
pub mod demo;
pub mod logging;
pub mod presenter;
pub mod scheduler;
pub mod ui;
pub mod watch;
