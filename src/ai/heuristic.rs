use serde::{Deserialize, Serialize};

use crate::game::{Board, Cell, Player, WIN_LENGTH};

pub const WIN_SCORE: i64 = 1000;
pub const THREE_IN_A_ROW_SCORE: i64 = 100;
pub const TWO_IN_A_ROW_SCORE: i64 = 10;

/// Largest weight accepted from configuration. Keeps a whole-board heuristic
/// sum well below the exact win/loss scores used by the search.
pub const MAX_WEIGHT: i64 = 10_000;

/// Trait for evaluating a board position from a player's perspective.
pub trait Heuristic: Send {
    fn evaluate(&self, board: &Board, player: Player) -> i64;
}

/// Per-window weights used by [`WindowHeuristic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorWeights {
    #[serde(rename = "win_score")]
    pub win: i64,
    #[serde(rename = "three_in_a_row_score")]
    pub three_in_a_row: i64,
    #[serde(rename = "two_in_a_row_score")]
    pub two_in_a_row: i64,
}

impl Default for EvaluatorWeights {
    fn default() -> Self {
        EvaluatorWeights {
            win: WIN_SCORE,
            three_in_a_row: THREE_IN_A_ROW_SCORE,
            two_in_a_row: TWO_IN_A_ROW_SCORE,
        }
    }
}

/// Scores every window on the board.
///
/// The player's own fours, open threes and open twos are rewarded. Only the
/// opponent's fours and open threes are penalized: opponent twos are
/// deliberately worth nothing.
#[derive(Debug, Clone, Default)]
pub struct WindowHeuristic {
    weights: EvaluatorWeights,
}

impl WindowHeuristic {
    pub fn new(weights: EvaluatorWeights) -> Self {
        WindowHeuristic { weights }
    }

    pub fn weights(&self) -> EvaluatorWeights {
        self.weights
    }

    fn score_window(&self, window: &[Cell; WIN_LENGTH], own: Cell, opp: Cell) -> i64 {
        let count = |target: Cell| window.iter().filter(|&&c| c == target).count();
        let own_count = count(own);
        let opp_count = count(opp);
        let empty = count(Cell::Empty);

        let gain = if own_count == 4 {
            self.weights.win
        } else if own_count == 3 && empty == 1 {
            self.weights.three_in_a_row
        } else if own_count == 2 && empty == 2 {
            self.weights.two_in_a_row
        } else {
            0
        };

        let loss = if opp_count == 3 && empty == 1 {
            self.weights.three_in_a_row
        } else if opp_count == 4 {
            self.weights.win
        } else {
            0
        };

        gain.saturating_sub(loss)
    }
}

impl Heuristic for WindowHeuristic {
    fn evaluate(&self, board: &Board, player: Player) -> i64 {
        let own = Cell::Piece(player);
        let opp = Cell::Piece(player.other());
        board
            .windows()
            .map(|window| self.score_window(&window, own, opp))
            .fold(0i64, i64::saturating_add)
    }
}
