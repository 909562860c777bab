//! XOShift CLI - Command-line interface
//!
//! Commands:
//! - play: Run agent-vs-agent matches, optionally recording a replay
//! - replay: Step through a recorded game, validating every move

mod runner;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use xoshift_core::{GameResult, Replay};

use crate::runner::MatchRunner;

/// Turn ceiling after which a game is declared drawn
const DEFAULT_MAX_TURNS: u32 = 250;

#[derive(Parser)]
#[command(name = "xoshift")]
#[command(about = "XOShift agent match runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play agent-vs-agent games
    Play {
        /// Board size (N >= 3)
        #[arg(long, default_value = "5")]
        size: usize,
        /// Search depth override (default adapts to board size)
        #[arg(long)]
        depth: Option<u32>,
        /// Number of games
        #[arg(long, default_value = "1")]
        games: usize,
        /// Base RNG seed for the agents
        #[arg(long, default_value = "42")]
        seed: u64,
        /// Declare a draw after this many moves
        #[arg(long, default_value_t = DEFAULT_MAX_TURNS)]
        max_turns: u32,
        /// Record the last game's moves to a JSON replay file
        #[arg(long)]
        record: Option<PathBuf>,
    },
    /// Print each position of a recorded game
    Replay {
        /// Replay JSON file
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            size,
            depth,
            games,
            seed,
            max_turns,
            record,
        } => play(size, depth, games, seed, max_turns, record),
        Commands::Replay { file } => show_replay(&file),
    }
}

fn play(
    size: usize,
    depth: Option<u32>,
    games: usize,
    seed: u64,
    max_turns: u32,
    record: Option<PathBuf>,
) -> anyhow::Result<()> {
    let mut runner = MatchRunner::new(size, depth, max_turns, seed);
    let mut x_wins = 0usize;
    let mut o_wins = 0usize;
    let mut draws = 0usize;

    for game_index in 1..=games {
        let outcome = runner
            .play_game()
            .with_context(|| format!("game {game_index}"))?;

        match outcome.result {
            GameResult::XWins => x_wins += 1,
            GameResult::OWins => o_wins += 1,
            GameResult::Draw | GameResult::Ongoing => draws += 1,
        }
        println!(
            "game {game_index}: {:?} in {} moves",
            outcome.result, outcome.turns
        );

        if game_index == games {
            if let Some(path) = &record {
                outcome.into_replay(size).save(path)?;
                println!("replay saved to {}", path.display());
            }
        }
    }

    println!("total: X {x_wins} / O {o_wins} / draws {draws}");
    Ok(())
}

fn show_replay(file: &Path) -> anyhow::Result<()> {
    let replay = Replay::load(file)?;
    println!(
        "{}x{} game, {} moves, result {:?}",
        replay.board_size,
        replay.board_size,
        replay.moves.len(),
        replay.result
    );

    for plies in 0..=replay.moves.len() {
        let game = replay.position_after(plies)?;
        if plies == 0 {
            println!("start:");
        } else {
            let record = &replay.moves[plies - 1];
            println!("move {plies}: {} plays {}", record.player, record.mv);
        }
        print!("{}", game.board());
    }
    Ok(())
}
