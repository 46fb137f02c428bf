use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::debug;

use crate::game::{Command, GameEngine, GameError, GameState, PauseState, Phase, TickResult};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::modes::TickScheduler;
use crate::render::{Banner, Renderer};

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    scheduler: TickScheduler,
    banner: Option<(Banner, Instant)>,
    message_duration: Duration,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(mut engine: GameEngine) -> Result<Self> {
        let state = engine.reset().context("Failed to set up the board")?;
        let scheduler = TickScheduler::new(engine.config().tick_interval());
        let message_duration = engine.config().message_duration();

        Ok(Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            scheduler,
            banner: None,
            message_duration,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick, only scheduled while running
                _ = self.scheduler.tick() => {
                    self.update_game()?;
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let banner = self.current_banner();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics, banner);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        let action = match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.input_handler.handle_key_event(key)
            }
            Event::Mouse(mouse) => self.input_handler.handle_mouse_event(mouse),
            _ => KeyAction::None,
        };

        self.handle_action(action)
    }

    fn handle_action(&mut self, action: KeyAction) -> Result<()> {
        match action {
            KeyAction::Game(command) => self.apply_command(command)?,
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }

        Ok(())
    }

    fn apply_command(&mut self, command: Command) -> Result<()> {
        match command {
            // Turns only count while the snake is moving
            Command::Turn(direction) => {
                if self.state.is_running() {
                    self.state.set_direction(direction);
                }
            }
            Command::Start => {
                let before = self.state.phase;
                let phase = self.engine.start(&mut self.state)?;
                if matches!(before, Phase::Ready | Phase::Ended) && phase == Phase::Running {
                    self.banner = None;
                    self.metrics.on_game_start();
                    self.metrics.on_length_change(self.state.snake.len());
                }
            }
            Command::TogglePause => match self.state.toggle_pause() {
                PauseState::Paused => self.metrics.on_pause(),
                PauseState::Resumed => self.metrics.on_resume(),
                PauseState::Inactive => {}
            },
            Command::Restart => {
                let restarted = self.engine.restart(&mut self.state)?;
                if restarted.cleared_game_over {
                    debug!("dismissing game over screen");
                }
                self.banner = None;
                self.metrics.on_game_reset();
            }
        }

        self.scheduler.follow(self.state.phase);
        Ok(())
    }

    fn update_game(&mut self) -> Result<()> {
        match self.engine.advance(&mut self.state) {
            Ok(TickResult::Moved {
                length, ate_food, ..
            }) => {
                self.metrics.on_length_change(length);
                if ate_food {
                    if let Some(item) = self.state.last_collected() {
                        self.banner = Some((Banner::from(item), Instant::now()));
                    }
                }
            }
            Ok(TickResult::Collision { .. }) | Err(GameError::BoardFull) => {
                self.metrics.on_game_over(self.state.score);
            }
            Ok(TickResult::Idle) => {}
            Err(err) => return Err(err).context("Game tick failed"),
        }

        self.scheduler.follow(self.state.phase);
        Ok(())
    }

    /// Banner for the last collected item, while it is still fresh
    fn current_banner(&self) -> Option<&Banner> {
        self.banner
            .as_ref()
            .filter(|(_, shown_at)| shown_at.elapsed() < self.message_duration)
            .map(|(banner, _)| banner)
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
