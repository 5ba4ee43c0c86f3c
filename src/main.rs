//! Reedbed: a territory tile game engine with move-search AI.
//!
//! ## Usage
//!
//! - `reedbed` - Show a demo
//! - `reedbed demo` - Place a few tiles and houses and print the villages
//! - `reedbed selfplay` - Let two configured bots play a full game

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};

use reedbed::catalog::load_or_builtin;
use reedbed::game::GameState;
use reedbed::strategy::{BotConfig, StrategyKind};
use reedbed::tile::PlayerColor;

/// Reedbed: a territory tile game engine
#[derive(Parser)]
#[command(name = "reedbed")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Tile catalog file (JSON); the built-in set is used when absent
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simple demo of the engine
    Demo,
    /// Play a full bot-vs-bot game
    Selfplay {
        /// Strategy for red: deterministic, random, minimax,
        /// minimax-random, or montecarlo
        #[arg(long, default_value = "minimax")]
        red: String,
        /// Strategy for blue
        #[arg(long, default_value = "montecarlo")]
        blue: String,
        /// Thinking-time budget per move, in milliseconds
        #[arg(long, default_value_t = reedbed::constants::DEFAULT_THINK_MS)]
        time_ms: u64,
        /// Pick randomly among near-best moves
        #[arg(long)]
        randomize: bool,
        /// Relative tolerance for the randomized pick
        #[arg(long, default_value_t = reedbed::constants::DEFAULT_TOLERANCE)]
        tolerance: f64,
        /// Seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    let _logger = flexi_logger::Logger::try_with_env_or_str("info")?.start()?;
    let cli = Cli::parse();

    let tiles = load_or_builtin(cli.catalog.as_deref());
    match cli.command {
        Some(Commands::Selfplay {
            red,
            blue,
            time_ms,
            randomize,
            tolerance,
            seed,
        }) => {
            let red = bot_config(&red, time_ms, randomize, tolerance, seed)?;
            let blue = bot_config(&blue, time_ms, randomize, tolerance, seed.map(|s| s + 1))?;
            run_selfplay(GameState::new(tiles), red, blue);
        }
        Some(Commands::Demo) | None => run_demo(GameState::new(tiles)),
    }
    Ok(())
}

fn bot_config(
    strategy: &str,
    time_ms: u64,
    randomize: bool,
    tolerance: f64,
    seed: Option<u64>,
) -> anyhow::Result<BotConfig> {
    let kind: StrategyKind = strategy
        .parse()
        .with_context(|| format!("bad strategy `{strategy}`"))?;
    let mut config = BotConfig::new(kind);
    config.think_time = Duration::from_millis(time_ms);
    config.randomize = randomize;
    config.tolerance = tolerance;
    config.seed = seed;
    Ok(config)
}

fn run_demo(mut game: GameState) {
    println!("Reedbed: territory tile game engine\n");

    println!("=== Placement Demo ===");
    let first = game.reedbed()[0].id();
    let second = game.reedbed()[1].id();
    game.place_tile(first, 0, 0, 0, 0);
    game.place_tile(second, 2, 0, 0, 0);
    game.place_house(first, 0, 0, PlayerColor::Red);
    game.place_house(first, 0, 1, PlayerColor::Red);
    println!("{}", game.board());

    for color in [PlayerColor::Red, PlayerColor::Blue] {
        for village in game.villages(color) {
            println!(
                "{color} village: {} houses over {} islands",
                village.size(),
                village.islands()
            );
        }
    }

    println!("\n=== Search Demo ===");
    let mut bot = BotConfig::new(StrategyKind::MonteCarlo).build();
    match bot.choose(&game) {
        Some(mv) => println!("montecarlo suggests: {mv}"),
        None => println!("no legal moves"),
    }
}

fn run_selfplay(mut game: GameState, red: BotConfig, blue: BotConfig) {
    let mut red_bot = red.build();
    let mut blue_bot = blue.build();
    let mut placements = 0u32;

    while !game.is_over() {
        let color = game.current_player();
        let bot = match color {
            PlayerColor::Red => &mut red_bot,
            PlayerColor::Blue => &mut blue_bot,
        };
        let Some(mv) = bot.choose(&game) else {
            // Out of moves without the end condition firing; nothing left
            // to play.
            log::info!("{color} has no legal moves, stopping");
            break;
        };
        if !game.apply(&mv) {
            log::error!("{color} chose an illegal move: {mv}");
            break;
        }
        placements += 1;
        log::info!("{color}: {mv}");
    }

    println!("{}", game.board());
    println!("placements: {placements}");
    match game.result() {
        Some(result) => match result.winner {
            Some(color) => println!(
                "winner: {color} ({} houses over {} islands)",
                match color {
                    PlayerColor::Red => result.red.size,
                    PlayerColor::Blue => result.blue.size,
                },
                match color {
                    PlayerColor::Red => result.red.islands,
                    PlayerColor::Blue => result.blue.islands,
                }
            ),
            None => println!("draw"),
        },
        None => {
            // Compare standing villages so an exhausted game still reports
            // something useful.
            for color in [PlayerColor::Red, PlayerColor::Blue] {
                let villages = game.placed_villages(color);
                let best = reedbed::village::largest(&villages);
                println!(
                    "{color}: largest village {} houses over {} islands",
                    best.map_or(0, |v| v.size()),
                    best.map_or(0, |v| v.islands())
                );
            }
        }
    }
}
