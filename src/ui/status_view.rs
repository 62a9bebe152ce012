use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::centered_rect;
use crate::config::DemoConfig;
use crate::presenter::{Phase, StepPresenter, StepStatus};
use crate::scheduler::RevealScheduler;

/// Identity shown on the success card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentCard {
    pub name: String,
    pub id: String,
    pub view_href: String,
}

impl AgentCard {
    pub fn from_config(demo: &DemoConfig) -> Self {
        Self {
            name: demo.agent_name.clone(),
            id: demo.agent_id.clone(),
            view_href: demo.view_href.clone(),
        }
    }
}

fn status_color(status: StepStatus) -> Color {
    match status {
        StepStatus::Done => Color::Green,
        StepStatus::Active => Color::Cyan,
        StepStatus::Pending => Color::DarkGray,
    }
}

/// Header title for the current phase
pub fn header_title(phase: Phase) -> &'static str {
    match phase {
        Phase::InProgress => "agent deployment",
        Phase::Completed => "agent deployed",
    }
}

/// Lines for every revealed step. Unrevealed steps take no space.
pub fn step_lines<S: RevealScheduler>(presenter: &StepPresenter<S>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (index, step) in presenter.steps().iter().enumerate() {
        if !presenter.is_revealed(index) {
            continue;
        }
        let status = presenter.step_status(index);
        let color = status_color(status);

        let label_style = match status {
            StepStatus::Active => Style::default().fg(color).add_modifier(Modifier::BOLD),
            _ => Style::default().fg(color),
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{} ", status.glyph()), Style::default().fg(color)),
            Span::styled(step.label.clone(), label_style),
        ]));
        if !step.sub_label.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("  {}", step.sub_label),
                Style::default().fg(Color::DarkGray),
            )));
        }

        match status {
            StepStatus::Active => lines.push(Line::from(vec![
                Span::styled(format!("  {}", step.detail), Style::default().fg(Color::Cyan)),
                Span::styled(
                    "▌",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::SLOW_BLINK),
                ),
            ])),
            StepStatus::Done => lines.push(Line::from(Span::styled(
                format!("  {}", step.done_detail()),
                Style::default().fg(Color::Green).add_modifier(Modifier::DIM),
            ))),
            StepStatus::Pending => {}
        }

        lines.push(Line::from(""));
    }

    lines
}

/// Lines of the "agent ready" card
pub fn success_lines(card: &AgentCard) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            "🎉 Agent Ready",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                card.name.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" has been created,"),
        ]),
        Line::from("your repo is live and pipeline is running."),
        Line::from(""),
        Line::from(vec![
            Span::styled("View Agent Dashboard → ", Style::default().fg(Color::Green)),
            Span::styled(
                card.view_href.clone(),
                Style::default().add_modifier(Modifier::UNDERLINED),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("ID: {} · OPERATIONAL", card.id),
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

/// The deployment status card
pub struct StatusView {
    pub card: AgentCard,
}

impl StatusView {
    pub fn new(card: AgentCard) -> Self {
        Self { card }
    }

    pub fn render<S: RevealScheduler>(&self, frame: &mut Frame, presenter: &StepPresenter<S>) {
        let area = centered_rect(60, 70, frame.area());
        let phase = presenter.phase();

        let header_color = match phase {
            Phase::InProgress => Color::Cyan,
            Phase::Completed => Color::Green,
        };

        let block = Block::default()
            .title(Line::from(vec![
                Span::styled(" ● ", Style::default().fg(header_color)),
                Span::styled(
                    format!("{} ", header_title(phase)),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Card body
                Constraint::Length(1), // Key hints
            ])
            .split(inner);

        let body = match phase {
            Phase::InProgress => Paragraph::new(step_lines(presenter)),
            Phase::Completed => {
                Paragraph::new(success_lines(&self.card)).alignment(Alignment::Center)
            }
        };
        frame.render_widget(body.wrap(Wrap { trim: false }), chunks[0]);

        let hints = Paragraph::new(Line::from(vec![
            Span::styled("[r]", Style::default().fg(Color::Cyan)),
            Span::raw(" replay  "),
            Span::styled("[q]", Style::default().fg(Color::Cyan)),
            Span::raw(" quit"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(hints, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::default_steps;
    use crate::scheduler::ManualScheduler;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn card() -> AgentCard {
        AgentCard {
            name: "data-pipeline-agent".to_string(),
            id: "AGT-7F3A2B".to_string(),
            view_href: "#".to_string(),
        }
    }

    fn presenter() -> StepPresenter<ManualScheduler> {
        StepPresenter::new(
            default_steps(),
            Duration::from_millis(180),
            ManualScheduler::new(),
        )
        .unwrap()
    }

    fn reveal_all(presenter: &mut StepPresenter<ManualScheduler>) {
        for event in presenter.scheduler_mut().run_until_idle() {
            presenter.apply_reveal(event);
        }
    }

    fn text(lines: &[Line]) -> Vec<String> {
        lines.iter().map(ToString::to_string).collect()
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_unrevealed_steps_render_nothing() {
        let mut p = presenter();
        p.set_progress(Phase::InProgress, 2);
        assert!(step_lines(&p).is_empty());
    }

    #[test]
    fn test_step_lines_show_status_details() {
        let mut p = presenter();
        p.set_progress(Phase::InProgress, 1);
        reveal_all(&mut p);

        let lines = text(&step_lines(&p));
        assert!(lines.contains(&"✓ Initializing Agent".to_string()));
        assert!(lines.contains(&"  agent.init() → bootstrapping runtime ✓".to_string()));
        assert!(lines.contains(&"◉ Creating Git Repository".to_string()));
        assert!(lines.contains(&"  git.createRepo() → setting upstream...▌".to_string()));
        assert!(!lines.iter().any(|l| l.contains("Triggering Pipeline")));
    }

    #[test]
    fn test_success_lines() {
        let lines = text(&success_lines(&card()));
        assert_eq!(lines[0], "🎉 Agent Ready");
        assert!(lines.contains(&"data-pipeline-agent has been created,".to_string()));
        assert!(lines.contains(&"ID: AGT-7F3A2B · OPERATIONAL".to_string()));
    }

    #[test]
    fn test_header_title() {
        assert_eq!(header_title(Phase::InProgress), "agent deployment");
        assert_eq!(header_title(Phase::Completed), "agent deployed");
    }

    #[test]
    fn test_render_in_progress() {
        let mut p = presenter();
        p.set_progress(Phase::InProgress, 0);
        reveal_all(&mut p);

        let view = StatusView::new(card());
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| view.render(f, &p)).unwrap();

        let screen = buffer_text(&terminal);
        assert!(screen.contains("agent deployment"));
        assert!(screen.contains("Initializing Agent"));
        assert!(!screen.contains("Agent Ready"));
    }

    #[test]
    fn test_render_completed_shows_success_card() {
        let mut p = presenter();
        p.set_progress(Phase::Completed, 2);

        let view = StatusView::new(card());
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| view.render(f, &p)).unwrap();

        let screen = buffer_text(&terminal);
        assert!(screen.contains("agent deployed"));
        assert!(screen.contains("OPERATIONAL"));
        assert!(screen.contains("data-pipeline-agent"));
    }
}
