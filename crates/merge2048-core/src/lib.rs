//! Core library for a sliding-tile merge puzzle on an N x N grid.
//!
//! The `engine` module owns the board and the move/merge rules; `error`
//! holds the typed failures surfaced by the engine API. Rendering, input
//! handling, and the interactive loop live in the companion binary crate,
//! which consumes only the re-exports below.

pub mod engine;
pub mod error;

pub use engine::{Board, Game, Move, MoveOutcome, GOAL_TILE};
pub use error::GameError;
