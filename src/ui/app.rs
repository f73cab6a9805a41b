use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;

use super::session::Session;
use crate::error::GameError;
use crate::game::GameOutcome;

pub struct App {
    session: Session,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
}

impl App {
    pub fn new(session: Session) -> Self {
        let selected_column = session.state().board().cols() / 2; // Start in middle
        App {
            session,
            selected_column,
            should_quit: false,
            message: None,
        }
    }

    /// Main application loop
    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Draw the human's move before the AI starts thinking
            if !self.session.state().is_terminal() && !self.session.is_human_turn() {
                self.message = Some("Thinking...".to_string());
                terminal.draw(|f| self.render(f))?;
                self.play_agent();
                continue;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        // Clear message on any key press
        self.message = None;
        let last_col = self.session.state().board().cols() - 1;

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column < last_col {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '0'..='9') => {
                let col = c as usize - '0' as usize;
                if col <= last_col {
                    self.selected_column = col;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.session.reset();
                self.selected_column = self.session.state().board().cols() / 2;
                self.message = Some("New game started!".to_string());
                log::info!("game restarted");
            }
            _ => {}
        }
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        match self.session.play_human(self.selected_column) {
            Ok(_) => self.announce_outcome(),
            Err(GameError::GameOver) => {
                self.message = Some("Game over! Press 'r' to restart.".to_string());
            }
            Err(GameError::InvalidMove(e)) => {
                log::debug!("rejected move: {e}");
                self.message = Some(format!("Invalid move: {e}"));
            }
            Err(e) => {
                self.message = Some(e.to_string());
            }
        }
    }

    fn play_agent(&mut self) {
        match self.session.play_agent() {
            Ok(Some(mv)) => {
                self.message = Some(format!("{} played column {}", mv.player.name(), mv.column));
                self.announce_outcome();
            }
            Ok(None) => self.message = None,
            Err(e) => {
                log::error!("agent failed to move: {e}");
                self.message = Some(e.to_string());
                self.should_quit = true;
            }
        }
    }

    /// Replace the message with the result once the game has ended
    fn announce_outcome(&mut self) {
        if let Some(outcome) = self.session.state().outcome() {
            log::info!("game over: {outcome:?}");
            self.message = Some(match outcome {
                GameOutcome::Winner(player) => format!("{} wins!", self.session.label(player)),
                GameOutcome::Draw => "It's a draw!".to_string(),
            });
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.session, self.selected_column, &self.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::ui::Opponent;
    use crossterm::event::KeyModifiers;

    fn app() -> App {
        let mut config = AppConfig::default();
        config.search.depth = 1;
        App::new(Session::from_config(&config, Opponent::Human).unwrap())
    }

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
        app.handle_key(KeyEvent::new(code, modifiers));
    }

    #[test]
    fn restart_accepts_either_case() {
        for (key, modifiers) in [('r', KeyModifiers::NONE), ('R', KeyModifiers::SHIFT)] {
            let mut app = app();
            press(&mut app, KeyCode::Enter, KeyModifiers::NONE);
            assert_eq!(app.session.state().board().piece_count(), 1);

            press(&mut app, KeyCode::Char(key), modifiers);
            assert_eq!(app.session.state().board().piece_count(), 0, "key {key:?}");
            assert_eq!(app.message.as_deref(), Some("New game started!"));
            assert_eq!(app.selected_column, 3);
        }
    }

    #[test]
    fn quit_accepts_either_case() {
        for key in ['q', 'Q'] {
            let mut app = app();
            press(&mut app, KeyCode::Char(key), KeyModifiers::NONE);
            assert!(app.should_quit, "key {key:?}");
        }
    }

    #[test]
    fn digit_selects_column_within_board() {
        let mut app = app();
        press(&mut app, KeyCode::Char('5'), KeyModifiers::NONE);
        assert_eq!(app.selected_column, 5);
        press(&mut app, KeyCode::Char('9'), KeyModifiers::NONE);
        assert_eq!(app.selected_column, 5);
    }
}
