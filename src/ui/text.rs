use std::io::{self, BufRead, Write};

use super::session::Session;
use crate::error::GameError;
use crate::game::GameOutcome;

/// Play a game on plain text streams. Returns the outcome, or `None` if the
/// input ran out first.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    mut out: W,
) -> io::Result<Option<GameOutcome>> {
    writeln!(out, "{}", session.state().board())?;

    loop {
        if let Some(outcome) = session.state().outcome() {
            match outcome {
                GameOutcome::Winner(player) => {
                    writeln!(out, "{} wins!", session.label(player))?
                }
                GameOutcome::Draw => writeln!(out, "It's a draw!")?,
            }
            log::info!("game over: {outcome:?}");
            return Ok(Some(outcome));
        }

        if !session.is_human_turn() {
            match session.play_agent() {
                Ok(Some(mv)) => {
                    writeln!(
                        out,
                        "{} ({}) plays column {}",
                        mv.player.name(),
                        mv.agent,
                        mv.column
                    )?;
                    writeln!(out, "{}", session.state().board())?;
                }
                Ok(None) => {}
                Err(e) => return Err(io::Error::other(e)),
            }
            continue;
        }

        let player = session.state().current_player();
        let last_col = session.state().board().cols() - 1;
        write!(
            out,
            "{}'s move, enter column (0-{last_col}): ",
            session.label(player)
        )?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(None);
        }

        let column = match line.trim().parse::<usize>() {
            Ok(column) => column,
            Err(_) => {
                writeln!(out, "Invalid input. Please enter a number.")?;
                continue;
            }
        };

        match session.play_human(column) {
            Ok(_) => writeln!(out, "{}", session.state().board())?,
            Err(GameError::InvalidMove(e)) => {
                log::debug!("rejected move from {}: {e}", player.name());
                writeln!(out, "Invalid move: {e}")?;
            }
            Err(e) => return Err(io::Error::other(e)),
        }
    }
}
