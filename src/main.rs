use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;
use log::info;

use game_2048::config::GameConfig;
use game_2048::engine::{self as GameEngine, Tile};
use game_2048::session::{Report, Session, Status};

#[derive(Parser, Debug)]
#[command(name = "game-2048", version, about = "Play 2048 in the terminal (w/a/s/d, r restart, e exit)")]
struct Args {
    /// Path to a TOML game config
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Seed for tile spawns (overrides the config)
    #[arg(long)]
    seed: Option<u64>,
    /// Winning tile value (overrides the config)
    #[arg(long)]
    target: Option<Tile>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    GameEngine::new();

    let mut config = match &args.config {
        Some(path) => {
            info!("Using configuration file: {}", path.display());
            GameConfig::from_toml(path)?
        }
        None => GameConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if let Some(target) = args.target {
        config.target = target;
    }

    let mut session = config.session()?;
    draw(&session.report());

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        for key in line?.chars() {
            if session.status().is_terminal() && key.eq_ignore_ascii_case(&'e') {
                return Ok(());
            }
            let was_terminal = session.status().is_terminal();
            let report = session.handle_key(key);
            if was_terminal {
                if report.status == Status::Playing {
                    println!("Game restarted! Continue playing.");
                    draw(&report);
                } else {
                    println!("Press 'r' to restart or 'e' to exit.");
                }
                continue;
            }
            if report.changed {
                draw(&report);
            }
            match report.status {
                Status::Playing => {}
                Status::Won => game_over(&session, "Congratulations! You won!"),
                Status::Lost => game_over(&session, "Game Over!"),
            }
        }
        io::stdout().flush()?;
    }
    Ok(())
}

fn draw(report: &Report) {
    println!("{}", report.board);
    println!("2048 Game - Score: {}", report.score);
}

fn game_over<R: rand::Rng>(session: &Session<R>, message: &str) {
    println!("{}", message);
    println!("\nScoreboard:");
    for (idx, score) in session.score_history().iter().enumerate() {
        println!("{}. {}", idx + 1, score);
    }
    println!();
    println!("Press 'r' to restart or 'e' to exit.");
}
