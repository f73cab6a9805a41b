//! Move selection: the minimax / alpha-beta search engine, its window
//! heuristic, and a random opponent.

mod agent;
pub mod heuristic;
pub mod minimax;
mod random;

pub use agent::Agent;
pub use heuristic::{EvaluatorWeights, Heuristic, WindowHeuristic};
pub use minimax::{Difficulty, MinimaxAgent, SearchOutcome};
pub use random::RandomAgent;
