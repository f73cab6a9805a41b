use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::agent::Agent;
use crate::error::SearchError;
use crate::game::Board;

/// An agent that selects uniformly at random from legal actions.
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible agent for tests and demos
    pub fn with_seed(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_action(&mut self, board: &Board) -> Result<usize, SearchError> {
        let actions = board.valid_moves();
        if actions.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        let idx = self.rng.random_range(0..actions.len());
        Ok(actions[idx])
    }

    fn name(&self) -> &str {
        "Random"
    }
}
