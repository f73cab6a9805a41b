//! # Connect Four
//!
//! A Connect Four game engine with a depth-limited minimax AI using
//! alpha-beta pruning, playable from a ratatui terminal UI or a plain text
//! prompt.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, player, turn-tracking wrapper
//! - [`ai`]: Agent trait, minimax search engine, window heuristic, random agent
//! - [`ui`]: Play session, terminal UI and text driver
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod ui;
