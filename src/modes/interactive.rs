//! Terminal UI that trains and plays in the same window
//!
//! The session starts in training mode at a high tick rate. Space switches to
//! play mode, which slows the game down enough to watch the learned policy.
//!
//! # Controls
//!
//! - Space: Toggle training / play
//! - S: Save the Q-table
//! - Q/Esc/Ctrl+C: Save and quit

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{error, info};

use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;
use crate::rl::{Mode, Session};

/// Training tick rate
pub const TRAIN_HZ: u64 = 120;
/// Play tick rate
pub const PLAY_HZ: u64 = 15;

/// Tick period for a mode; only affects how fast the game is shown
pub fn tick_interval(mode: Mode) -> Duration {
    let hz = match mode {
        Mode::Training => TRAIN_HZ,
        Mode::Play => PLAY_HZ,
    };
    Duration::from_micros(1_000_000 / hz)
}

fn paced_timer(mode: Mode) -> Interval {
    let mut timer = interval(tick_interval(mode));
    timer.set_missed_tick_behavior(MissedTickBehavior::Skip);
    timer
}

pub struct InteractiveMode {
    session: Session,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl InteractiveMode {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    /// Run until the user quits
    ///
    /// The table is saved on the way out whether the loop ended normally or
    /// with an error.
    pub async fn run(&mut self) -> Result<()> {
        let result = match Self::setup_terminal() {
            Ok(mut terminal) => {
                let result = self.run_loop(&mut terminal).await;
                if let Err(err) = Self::cleanup_terminal(&mut terminal) {
                    error!(error = %format!("{err:#}"), "failed to restore terminal");
                }
                result
            }
            Err(err) => Err(err),
        };

        let saved = self.session.shutdown();
        result.and(saved)
    }

    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;
        Ok(terminal)
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut paced_mode = self.session.mode();
        let mut tick_timer = paced_timer(paced_mode);

        // Render at 30 FPS
        let mut render_timer = interval(Duration::from_millis(33));
        render_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(mode = %paced_mode, "interactive session started");

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    self.session.tick()?;

                    // Mode switches land inside the tick; re-pace afterwards
                    if self.session.mode() != paced_mode {
                        paced_mode = self.session.mode();
                        tick_timer = paced_timer(paced_mode);
                    }
                }

                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.session);
                    }).context("Failed to draw frame")?;
                }

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

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::ToggleMode => self.session.toggle_mode(),
                KeyAction::Save => self.session.request_save(),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }

    pub fn session(&self) -> &Session {
        &self.session
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameConfig;
    use crate::rl::{QLearningConfig, TableStore};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tempfile::TempDir;

    fn mode_in(dir: &TempDir) -> InteractiveMode {
        let store = TableStore::new(dir.path().join("qtable.json"));
        let session =
            Session::new(GameConfig::small(), QLearningConfig::default(), store, Some(3)).unwrap();
        InteractiveMode::new(session)
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_tick_intervals() {
        assert_eq!(tick_interval(Mode::Training), Duration::from_micros(8333));
        assert_eq!(tick_interval(Mode::Play), Duration::from_micros(66666));
        assert!(tick_interval(Mode::Play) > tick_interval(Mode::Training));
    }

    #[test]
    fn test_keys_reach_session() {
        let dir = TempDir::new().unwrap();
        let mut mode = mode_in(&dir);

        mode.handle_event(press(KeyCode::Char(' ')));
        mode.handle_event(press(KeyCode::Char('s')));
        assert!(!mode.should_quit);

        mode.session.tick().unwrap();
        assert_eq!(mode.session().mode(), Mode::Play);
        assert!(mode.session().store().path().exists());

        mode.handle_event(press(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }
}
