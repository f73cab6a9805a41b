use super::{Board, Player};
use crate::error::{BoardError, GameError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// Board plus turn tracking, for drivers that don't want to manage turns
/// themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    first_player: Player,
    current_player: Player,
    outcome: Option<GameOutcome>,
}

impl GameState {
    /// Create initial game state on a standard board, Red to move
    pub fn initial() -> Self {
        Self::from_board(Board::new(), Player::Red)
    }

    /// Create initial game state with custom dimensions and starting player
    pub fn with_dimensions(
        rows: usize,
        cols: usize,
        first_player: Player,
    ) -> Result<Self, BoardError> {
        Ok(Self::from_board(
            Board::with_dimensions(rows, cols)?,
            first_player,
        ))
    }

    fn from_board(board: Board, first_player: Player) -> Self {
        GameState {
            board,
            first_player,
            current_player: first_player,
            outcome: None,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Get list of legal columns, empty once the game is over
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.valid_moves()
    }

    /// Drop the current player's piece, then settle the outcome and pass the
    /// turn. Returns the row the piece landed in.
    pub fn apply_move_mut(&mut self, column: usize) -> Result<usize, GameError> {
        if self.is_terminal() {
            return Err(GameError::GameOver);
        }

        let row = self.board.drop_piece(column, self.current_player)?;

        if self.board.is_win(self.current_player) {
            self.outcome = Some(GameOutcome::Winner(self.current_player));
        } else if self.board.is_draw() {
            self.outcome = Some(GameOutcome::Draw);
        }

        self.current_player = self.current_player.other();

        Ok(row)
    }

    /// Apply a move and return new state, leaving `self` untouched
    pub fn apply_move(&self, column: usize) -> Result<GameState, GameError> {
        let mut next = self.clone();
        next.apply_move_mut(column)?;
        Ok(next)
    }

    /// Start over on an empty board of the same size
    pub fn reset(&mut self) {
        self.board.clear();
        self.current_player = self.first_player;
        self.outcome = None;
    }
}
