use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use crate::game::{CollectedItem, GameState, Phase, Position};
use crate::metrics::GameMetrics;

/// Transient message shown after collecting an item
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub symbol: String,
    pub message: String,
    pub is_positive: bool,
}

impl From<&CollectedItem> for Banner {
    fn from(item: &CollectedItem) -> Self {
        Self {
            symbol: item.symbol.clone(),
            message: item.message.clone(),
            is_positive: item.is_positive,
        }
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        banner: Option<&Banner>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Message banner
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        if let Some(banner) = banner {
            frame.render_widget(self.render_banner(banner), chunks[1]);
        }

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[2])[1];

        if state.is_over() {
            let game_over = self.render_game_over(state);
            frame.render_widget(game_over, game_area);
        } else {
            let grid = self.render_grid(game_area, state);
            frame.render_widget(grid, game_area);
        }

        let controls = self.render_controls(state.phase);
        frame.render_widget(controls, chunks[3]);
    }

    fn render_grid(&self, _area: Rect, state: &GameState) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for y in 0..state.grid_height {
            let mut spans = Vec::new();

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == state.snake.head() {
                    // Snake head - distinct color
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.occupies(pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if let Some(food) = state.food.as_ref().filter(|food| food.position == pos)
                {
                    let color = if food.item.is_positive() {
                        Color::LightGreen
                    } else {
                        Color::LightRed
                    };
                    food_cell(&food.item.symbol, Style::default().fg(color))
                } else {
                    // Empty cell
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let title = match state.phase {
            Phase::Ready => " Eco Snake - press Enter to start ",
            Phase::Paused => " Paused ",
            Phase::Running | Phase::Ended => " Eco Snake ",
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let best = metrics
            .high_score
            .map(|score| score.to_string())
            .unwrap_or_else(|| "-".to_string());

        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.snake.len().to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(best, Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_banner<'a>(&self, banner: &'a Banner) -> Paragraph<'a> {
        let color = if banner.is_positive {
            Color::Green
        } else {
            Color::Red
        };

        Paragraph::new(Line::from(vec![
            Span::raw(banner.symbol.as_str()),
            Span::raw(" "),
            Span::styled(banner.message.as_str(), Style::default().fg(color)),
        ]))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_game_over(&self, state: &GameState) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Length: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.snake.len().to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, phase: Phase) -> Paragraph<'_> {
        let pause_label = if phase == Phase::Paused {
            " resume | "
        } else {
            " pause | "
        };

        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" move | "),
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(" start | "),
            Span::styled("Space", Style::default().fg(Color::Yellow)),
            Span::raw(pause_label),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

/// Food symbols are padded to the two-column cell width
fn food_cell(symbol: &str, style: Style) -> Span<'static> {
    let span = Span::styled(symbol.to_string(), style);
    if span.width() < 2 {
        Span::styled(format!("{symbol} "), style)
    } else {
        span
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameEngine};
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(state: &GameState, banner: Option<&Banner>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let renderer = Renderer::new();
        let metrics = GameMetrics::new();

        terminal
            .draw(|frame| renderer.render(frame, state, &metrics, banner))
            .unwrap();

        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_renders_header_and_ready_title() {
        let mut engine = GameEngine::new(GameConfig::small()).unwrap();
        let state = engine.reset().unwrap();

        let screen = draw(&state, None);

        assert!(screen.contains("Score:"));
        assert!(screen.contains("Length:"));
        assert!(screen.contains("press Enter to start"));
    }

    #[test]
    fn test_renders_banner_message() {
        let mut engine = GameEngine::new(GameConfig::small()).unwrap();
        let state = engine.reset().unwrap();
        let banner = Banner {
            symbol: "*".to_string(),
            message: "Trees provide oxygen".to_string(),
            is_positive: true,
        };

        let screen = draw(&state, Some(&banner));

        assert!(screen.contains("Trees provide oxygen"));
    }

    #[test]
    fn test_renders_game_over() {
        let mut engine = GameEngine::new(GameConfig::small()).unwrap();
        let mut state = engine.reset().unwrap();
        state.phase = Phase::Ended;

        let screen = draw(&state, None);

        assert!(screen.contains("GAME OVER"));
        assert!(screen.contains("Final Score:"));
    }
}
