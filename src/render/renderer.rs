use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GameState, GridWorld, Position};
use crate::rl::{Mode, Session};

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, session: &Session) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(session), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let grid = self.render_grid(session.grid(), session.game_state(), session.mode());
        frame.render_widget(grid, game_area);

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, grid: GridWorld, state: Option<&GameState>, mode: Mode) -> Paragraph<'_> {
        let mut lines = Vec::with_capacity(grid.height);

        for y in 0..grid.height {
            let mut spans = Vec::with_capacity(grid.width);

            for x in 0..grid.width {
                let pos = Position::new(x as i32, y as i32);

                let cell = match state {
                    Some(state) if pos == state.snake.head() => Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Some(state) if state.is_occupied_by_snake(pos) => {
                        Span::styled("□ ", Style::default().fg(Color::Green))
                    }
                    Some(state) if pos == state.food.position => Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ),
                    _ => Span::styled(". ", Style::default().fg(Color::DarkGray)),
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let border_color = match mode {
            Mode::Training => Color::Yellow,
            Mode::Play => Color::White,
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border_color))
                    .title(" Snake Q-learning "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, session: &Session) -> Paragraph<'_> {
        let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Yellow));
        let value = |text: String| {
            Span::styled(
                text,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
        };

        let mode_style = match session.mode() {
            Mode::Training => Style::default().fg(Color::Yellow),
            Mode::Play => Style::default().fg(Color::Green),
        };

        let text = vec![
            Line::from(vec![
                label("Episode: "),
                value(session.episode().to_string()),
                Span::raw("    "),
                label("Score: "),
                value(session.score().to_string()),
                Span::raw("    "),
                label("Best ever: "),
                value(session.best_score().to_string()),
            ]),
            Line::from(vec![
                label("Mode: "),
                Span::styled(
                    session.mode().to_string(),
                    mode_style.add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                label("Epsilon: "),
                value(format!("{:.2}", session.epsilon())),
                Span::raw("    "),
                label("States: "),
                value(session.agent().table().observation_count().to_string()),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("SPACE", Style::default().fg(Color::Cyan)),
            Span::raw(" train/play | "),
            Span::styled("S", Style::default().fg(Color::Cyan)),
            Span::raw(" save | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
