mod session;

use std::io;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use merge2048_core::Game;

use crate::session::Session;

/// Interactive sliding-tile merge puzzle.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Board side length (N gives an N x N grid).
    #[arg(default_value_t = 4)]
    size: usize,
    /// Seed the tile spawner for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let game = match args.seed {
        Some(seed) => Game::from_seed(args.size, seed),
        None => Game::new(args.size),
    }
    .context("could not set up the board")?;

    info!("starting a {0}x{0} game", args.size);
    let stdin = io::stdin();
    Session::new(game).run(&mut stdin.lock())
}
