//! The interactive session loop: read a command, drive the engine, render.
//!
//! The engine contract is deliberately exercised in three explicit steps per
//! accepted move: apply, spawn (only when the board changed), then check the
//! terminal state.

use std::io::BufRead;

use anyhow::Context;
use log::{debug, info};

use merge2048_core::{Game, Move};

/// A parsed line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Move),
    Quit,
}

/// Map a raw input line to a command; `None` asks the player to retry.
pub fn parse_command(line: &str) -> Option<Command> {
    match line.trim().to_lowercase().as_str() {
        "w" => Some(Command::Move(Move::Up)),
        "a" => Some(Command::Move(Move::Left)),
        "s" => Some(Command::Move(Move::Down)),
        "d" => Some(Command::Move(Move::Right)),
        "exit" => Some(Command::Quit),
        _ => None,
    }
}

pub struct Session {
    game: Game,
}

impl Session {
    pub fn new(game: Game) -> Self {
        Session { game }
    }

    /// Run the loop until the board locks up, the player quits, or input ends.
    pub fn run(mut self, input: &mut impl BufRead) -> anyhow::Result<()> {
        println!("{}", self.game.board());
        let mut line = String::new();
        loop {
            line.clear();
            let read = input.read_line(&mut line).context("failed to read input")?;
            if read == 0 {
                info!("input closed, ending the session");
                return Ok(());
            }
            match parse_command(&line) {
                Some(Command::Quit) => {
                    info!("session ended by player");
                    return Ok(());
                }
                Some(Command::Move(dir)) => {
                    if !self.step(dir)? {
                        return Ok(());
                    }
                }
                None => {
                    println!(
                        "Invalid command. Please use \"w\", \"a\", \"s\" and \"d\" for up, left, down, and right. Or \"exit\" to quit."
                    );
                }
            }
        }
    }

    /// Apply one direction; returns false once the board reaches its end state.
    fn step(&mut self, dir: Move) -> anyhow::Result<bool> {
        let outcome = self.game.apply_move(dir);
        debug!("move {dir:?}: moved={}", outcome.moved);
        if !outcome.moved {
            println!("Invalid move. No tiles can move that direction. Try again.");
            return Ok(true);
        }
        if outcome.reached_goal {
            println!("Congrats, now you can keep playing for a higher score.");
        }
        self.game
            .spawn_tile()
            .context("no room to spawn after a successful move")?;
        println!("{}", self.game.board());
        if self.game.is_terminal() {
            println!("Game over");
            info!("no moves left, ending the session");
            return Ok(false);
        }
        Ok(true)
    }
}
