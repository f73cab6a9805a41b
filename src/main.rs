use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use connect_four::ai::Difficulty;
use connect_four::config::AppConfig;
use connect_four::game::Player;
use connect_four::ui::{self, App, Opponent, Session};

/// Play Connect Four against a minimax AI.
#[derive(Parser)]
#[command(name = "connect_four", about = "Play Connect Four against a minimax AI")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Search depth in plies (overrides --difficulty and the config file)
    #[arg(long)]
    depth: Option<u32>,

    /// Named search depth: easy (2), normal (3), hard (4)
    #[arg(long, value_enum)]
    difficulty: Option<Difficulty>,

    /// Override board rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override board columns
    #[arg(long)]
    cols: Option<usize>,

    /// Piece the minimax AI plays
    #[arg(long, value_enum)]
    ai_player: Option<Player>,

    /// Who plays against the AI
    #[arg(long, value_enum, default_value = "human")]
    opponent: Opponent,

    /// Plain line-oriented prompt instead of the full-screen UI
    #[arg(long)]
    text: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    init_logging(cli.log_file.as_deref())?;

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(difficulty) = cli.difficulty {
        config.search.depth = difficulty.depth();
    }
    if let Some(depth) = cli.depth {
        config.search.depth = depth;
    }
    if let Some(rows) = cli.rows {
        config.board.rows = rows;
    }
    if let Some(cols) = cli.cols {
        config.board.cols = cols;
    }
    if let Some(ai_player) = cli.ai_player {
        config.game.ai_player = ai_player;
    }
    config.validate().context("invalid configuration")?;

    log::info!(
        "starting {}x{} game, AI plays {} at depth {}, opponent {:?}",
        config.board.rows,
        config.board.cols,
        config.game.ai_player.name(),
        config.search.depth,
        cli.opponent
    );

    let mut session = Session::from_config(&config, cli.opponent)?;

    if cli.text {
        let stdin = io::stdin();
        ui::text::run(&mut session, stdin.lock(), io::stdout())?;
        Ok(())
    } else {
        run_tui(session).context("terminal UI failed")
    }
}

/// Route `log` output through env_logger, defaulting to warnings. Logs go to
/// `log_file` when given so they don't draw over the full-screen UI.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn run_tui(session: Session) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session);
    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
