//! Core Connect Four game logic: board representation, player types, and an
//! optional turn-tracking wrapper.

mod board;
mod player;
mod state;

pub use board::{Board, Cell, Direction, COLS, ROWS, WIN_LENGTH};
pub use player::Player;
pub use state::{GameOutcome, GameState};
