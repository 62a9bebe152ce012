use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::demo::{DemoDriver, Progression};
use crate::presenter::StepPresenter;
use crate::scheduler::{RevealEvent, TokioScheduler};
use crate::ui::{AgentCard, StatusView};

pub struct App {
    config: Config,
    presenter: StepPresenter<TokioScheduler>,
    reveal_rx: mpsc::UnboundedReceiver<RevealEvent>,
    driver: DemoDriver,
    view: StatusView,
    should_quit: bool,
}

impl App {
    /// Build the app. Must be called from within a tokio runtime.
    pub fn new(config: Config) -> Result<Self> {
        let (scheduler, reveal_rx) = TokioScheduler::channel();
        let presenter = StepPresenter::new(config.steps.clone(), config.stagger(), scheduler)
            .context("Failed to initialize status presenter")?;
        let driver = DemoDriver::new(Progression::from_config(&config));
        let view = StatusView::new(AgentCard::from_config(&config.demo));

        tracing::info!(
            steps = config.steps.len(),
            agent = %config.demo.agent_name,
            "dashboard initialized"
        );

        Ok(Self {
            config,
            presenter,
            reveal_rx,
            driver,
            view,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        self.presenter.teardown();

        // Restore terminal even if the loop failed
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let tick_rate = self.config.refresh_rate();

        while !self.should_quit {
            self.pump();

            terminal.draw(|f| self.view.render(f, &self.presenter))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Apply delivered reveals, then push any progress change to the presenter.
    pub fn pump(&mut self) {
        while let Ok(event) = self.reveal_rx.try_recv() {
            if self.presenter.apply_reveal(event) {
                tracing::debug!(index = event.index, "step revealed");
            }
        }

        if let Some(snapshot) = self.driver.poll() {
            tracing::info!(phase = %snapshot.phase, step = snapshot.step, "progress");
            self.presenter.set_progress(snapshot.phase, snapshot.step);
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('r') => {
                self.presenter.reset();
                self.driver.replay();
            }
            _ => {}
        }
    }

    pub fn presenter(&self) -> &StepPresenter<TokioScheduler> {
        &self.presenter
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
