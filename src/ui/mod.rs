//! Drivers that put the core in front of a player: a full-screen ratatui
//! game and a line-oriented text game, both built on [`Session`].

mod app;
mod game_view;
mod session;
pub mod text;

pub use app::App;
pub use session::{AgentMove, Opponent, Session};
