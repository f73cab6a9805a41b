use crate::error::SearchError;
use crate::game::Board;

/// Universal interface for move-choosing opponents.
pub trait Agent {
    /// Select a column to play on `board`. Fails only when no column is open.
    fn select_action(&mut self, board: &Board) -> Result<usize, SearchError>;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
