use anyhow::{Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use warden_chess::ai::ComputerPlayer;
use warden_chess::board::Color;
use warden_chess::config::GameConfig;
use warden_chess::console::{self_play, Console, SelfPlayEnd};
use warden_chess::game::Game;
use warden_chess::player::EndCondition;

/// Chess with Phantoms and Wardens
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON game configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Computer plays both sides
    #[arg(long)]
    self_play: bool,

    /// Seed for the computer players
    #[arg(long)]
    seed: Option<u64>,

    /// Turn cap for self-play
    #[arg(long)]
    max_turns: Option<u32>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(max_turns) = args.max_turns {
        config.max_turns = max_turns;
    }
    if args.self_play {
        config.light_computer = true;
        config.dark_computer = true;
    }

    let computer = |color: Color, offset: u64| match config.seed {
        Some(seed) => ComputerPlayer::with_seed(color, seed.wrapping_add(offset)),
        None => ComputerPlayer::new(color),
    };
    let mut computers = [
        config.is_computer(Color::Light).then(|| computer(Color::Light, 0)),
        config.is_computer(Color::Dark).then(|| computer(Color::Dark, 1)),
    ];
    let max_turns = config.max_turns;
    let mut game = Game::new(config.clone())?;

    if args.self_play {
        let end = self_play(&mut game, &mut computers, max_turns, &mut io::stdout())?;
        match end {
            SelfPlayEnd::Finished(EndCondition::Checkmate) => {
                info!(loser = game.side_to_move().name(), "game over by checkmate")
            }
            SelfPlayEnd::Finished(_) => info!("game over by stalemate"),
            SelfPlayEnd::TurnLimit => info!(max_turns, "turn limit reached"),
            SelfPlayEnd::Stalled => warn!(side = game.side_to_move().name(), "self-play stopped early"),
        }
        return Ok(());
    }

    let mut console = Console::new(game, computers);
    let stdin = io::stdin();
    console.run(stdin.lock(), &mut io::stdout())?;
    Ok(())
}
