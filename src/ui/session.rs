use std::time::Instant;

use crate::ai::{Agent, MinimaxAgent, RandomAgent};
use crate::config::AppConfig;
use crate::error::{BoardError, GameError};
use crate::game::{GameState, Player};

/// What sits across the table from the minimax AI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Opponent {
    #[default]
    Human,
    Random,
    Minimax,
}

/// A move made by an agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentMove {
    pub player: Player,
    pub agent: String,
    pub column: usize,
    pub row: usize,
}

/// A game in progress plus whoever controls each piece. A seat without an
/// agent is played by a human through the driver.
pub struct Session {
    state: GameState,
    red: Option<Box<dyn Agent>>,
    yellow: Option<Box<dyn Agent>>,
}

impl Session {
    /// Minimax AI on `config.game.ai_player`, `opponent` on the other piece.
    pub fn from_config(config: &AppConfig, opponent: Opponent) -> Result<Self, BoardError> {
        let ai_player = config.game.ai_player;
        let ai: Box<dyn Agent> = Box::new(MinimaxAgent::with_weights(
            ai_player,
            config.search.depth,
            config.search.weights,
        ));
        let other: Option<Box<dyn Agent>> = match opponent {
            Opponent::Human => None,
            Opponent::Random => Some(Box::new(RandomAgent::new())),
            Opponent::Minimax => Some(Box::new(MinimaxAgent::with_weights(
                ai_player.other(),
                config.search.depth,
                config.search.weights,
            ))),
        };

        let state = GameState::with_dimensions(
            config.board.rows,
            config.board.cols,
            config.game.first_player,
        )?;
        let (red, yellow) = match ai_player {
            Player::Red => (Some(ai), other),
            Player::Yellow => (other, Some(ai)),
        };
        Ok(Session { state, red, yellow })
    }

    /// Session with explicit seats.
    pub fn new(
        state: GameState,
        red: Option<Box<dyn Agent>>,
        yellow: Option<Box<dyn Agent>>,
    ) -> Self {
        Session { state, red, yellow }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    fn seat(&mut self, player: Player) -> Option<&mut Box<dyn Agent>> {
        match player {
            Player::Red => self.red.as_mut(),
            Player::Yellow => self.yellow.as_mut(),
        }
    }

    /// Display label for a player, e.g. "Yellow (Minimax)".
    pub fn label(&self, player: Player) -> String {
        let seat = match player {
            Player::Red => &self.red,
            Player::Yellow => &self.yellow,
        };
        match seat {
            Some(agent) => format!("{} ({})", player.name(), agent.name()),
            None => player.name().to_string(),
        }
    }

    /// True when the game is live and a human controls the side to move.
    pub fn is_human_turn(&self) -> bool {
        let seat = match self.state.current_player() {
            Player::Red => &self.red,
            Player::Yellow => &self.yellow,
        };
        !self.state.is_terminal() && seat.is_none()
    }

    /// Play a human move for the side to move.
    pub fn play_human(&mut self, column: usize) -> Result<usize, GameError> {
        if self.state.is_terminal() {
            return Err(GameError::GameOver);
        }
        if !self.is_human_turn() {
            return Err(GameError::NotHumanTurn);
        }
        self.state.apply_move_mut(column)
    }

    /// Let the agent seated on the side to move play. `Ok(None)` when the
    /// game is over or a human is to move.
    pub fn play_agent(&mut self) -> Result<Option<AgentMove>, GameError> {
        if self.state.is_terminal() {
            return Ok(None);
        }
        let player = self.state.current_player();
        let board = self.state.board().clone();
        let Some(agent) = self.seat(player) else {
            return Ok(None);
        };

        let started = Instant::now();
        let column = agent.select_action(&board)?;
        let name = agent.name().to_string();
        log::debug!(
            "{} ({}) chose column {} in {:?}",
            player.name(),
            name,
            column,
            started.elapsed()
        );

        let row = self.state.apply_move_mut(column)?;
        Ok(Some(AgentMove {
            player,
            agent: name,
            column,
            row,
        }))
    }

    /// Start a new game with the same seats.
    pub fn reset(&mut self) {
        self.state.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameOutcome;

    fn shallow_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.search.depth = 2;
        config
    }

    #[test]
    fn human_moves_first_by_default() {
        let mut session = Session::from_config(&shallow_config(), Opponent::Human).unwrap();
        assert!(session.is_human_turn());
        assert_eq!(session.play_agent().unwrap(), None);

        session.play_human(3).unwrap();
        assert!(!session.is_human_turn());
        assert_eq!(session.play_human(3), Err(GameError::NotHumanTurn));

        let reply = session.play_agent().unwrap().expect("AI should reply");
        assert_eq!(reply.player, Player::Yellow);
        assert_eq!(reply.agent, "Minimax");
        assert!(session.is_human_turn());
    }

    #[test]
    fn ai_can_take_the_first_move() {
        let mut config = shallow_config();
        config.game.first_player = Player::Yellow;
        let mut session = Session::from_config(&config, Opponent::Human).unwrap();
        assert!(!session.is_human_turn());
        assert!(session.play_agent().unwrap().is_some());
        assert!(session.is_human_turn());
    }

    #[test]
    fn invalid_human_move_is_reported() {
        let mut session = Session::from_config(&shallow_config(), Opponent::Human).unwrap();
        assert!(matches!(
            session.play_human(42),
            Err(GameError::InvalidMove(_))
        ));
        assert!(session.is_human_turn());
        assert_eq!(session.state().board().piece_count(), 0);
    }

    #[test]
    fn agents_play_to_completion() {
        let mut session = Session::from_config(&shallow_config(), Opponent::Minimax).unwrap();
        while session.play_agent().unwrap().is_some() {}
        assert!(session.state().is_terminal());
        assert!(matches!(
            session.state().outcome(),
            Some(GameOutcome::Winner(_)) | Some(GameOutcome::Draw)
        ));

        session.reset();
        assert!(!session.state().is_terminal());
        assert_eq!(session.state().board().piece_count(), 0);
    }

    #[test]
    fn labels_name_the_agent() {
        let session = Session::from_config(&shallow_config(), Opponent::Random).unwrap();
        assert_eq!(session.label(Player::Red), "Red (Random)");
        assert_eq!(session.label(Player::Yellow), "Yellow (Minimax)");

        let session = Session::from_config(&shallow_config(), Opponent::Human).unwrap();
        assert_eq!(session.label(Player::Red), "Red");
    }
}
