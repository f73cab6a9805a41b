use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::game::{Board, Player};

use super::agent::Agent;
use super::heuristic::{EvaluatorWeights, Heuristic, WindowHeuristic};

/// Score of a position the AI has won.
pub const WIN_SENTINEL: i64 = 1_000_000;
/// Score of a position the opponent has won.
pub const LOSS_SENTINEL: i64 = -WIN_SENTINEL;
/// Score of a drawn position.
pub const DRAW_SCORE: i64 = 0;

/// Named search depths.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    /// Plies of lookahead for this level
    pub fn depth(self) -> u32 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Normal => 3,
            Difficulty::Hard => 4,
        }
    }
}

/// Root result of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    pub column: usize,
    pub score: i64,
}

/// Depth-limited minimax agent with alpha-beta pruning, playing `ai_piece`.
pub struct MinimaxAgent {
    ai_piece: Player,
    max_depth: u32,
    heuristic: Box<dyn Heuristic>,
}

impl MinimaxAgent {
    pub fn new(ai_piece: Player, max_depth: u32) -> Self {
        Self::with_weights(ai_piece, max_depth, EvaluatorWeights::default())
    }

    pub fn with_weights(ai_piece: Player, max_depth: u32, weights: EvaluatorWeights) -> Self {
        Self::with_heuristic(ai_piece, max_depth, Box::new(WindowHeuristic::new(weights)))
    }

    pub fn with_heuristic(ai_piece: Player, max_depth: u32, heuristic: Box<dyn Heuristic>) -> Self {
        MinimaxAgent {
            ai_piece,
            max_depth,
            heuristic,
        }
    }

    pub fn ai_piece(&self) -> Player {
        self.ai_piece
    }

    pub fn opponent_piece(&self) -> Player {
        self.ai_piece.other()
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Column the AI should play. The caller's board is never modified.
    pub fn find_best_move(&self, board: &Board) -> Result<usize, SearchError> {
        self.search(board).map(|outcome| outcome.column)
    }

    /// Full root result: chosen column and its minimax score.
    pub fn search(&self, board: &Board) -> Result<SearchOutcome, SearchError> {
        let fallback = *board
            .valid_moves()
            .first()
            .ok_or(SearchError::NoLegalMoves)?;

        let (score, column) =
            self.minimax(board, self.max_depth, true, i64::MIN, i64::MAX);

        // Terminal or depth-0 roots pick no column; any legal one will do.
        Ok(SearchOutcome {
            column: column.unwrap_or(fallback),
            score,
        })
    }

    /// Exact score for a finished position, heuristic score once the depth
    /// runs out, `None` while the search has to keep going.
    fn leaf_score(&self, board: &Board, depth: u32) -> Option<i64> {
        if board.is_win(self.ai_piece) {
            Some(WIN_SENTINEL)
        } else if board.is_win(self.opponent_piece()) {
            Some(LOSS_SENTINEL)
        } else if board.is_draw() {
            Some(DRAW_SCORE)
        } else if depth == 0 {
            // Heuristic scores stay strictly inside the terminal scores.
            let score = self.heuristic.evaluate(board, self.ai_piece);
            Some(score.clamp(LOSS_SENTINEL + 1, WIN_SENTINEL - 1))
        } else {
            None
        }
    }

    fn minimax(
        &self,
        board: &Board,
        depth: u32,
        maximizing: bool,
        mut alpha: i64,
        mut beta: i64,
    ) -> (i64, Option<usize>) {
        if let Some(score) = self.leaf_score(board, depth) {
            return (score, None);
        }

        let piece = if maximizing {
            self.ai_piece
        } else {
            self.opponent_piece()
        };
        let mut best_score = if maximizing { i64::MIN } else { i64::MAX };
        let mut best_column = None;

        for col in board.valid_moves() {
            // valid_moves only yields open columns.
            let mut child = board.clone();
            let landed = child.drop_piece(col, piece);
            debug_assert!(landed.is_ok(), "valid_moves yielded full column {col}");

            let (score, _) = self.minimax(&child, depth - 1, !maximizing, alpha, beta);

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_column = Some(col);
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_column = Some(col);
                }
                beta = beta.min(best_score);
            }

            if alpha >= beta {
                break;
            }
        }

        (best_score, best_column)
    }
}

impl Agent for MinimaxAgent {
    fn select_action(&mut self, board: &Board) -> Result<usize, SearchError> {
        self.find_best_move(board)
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
