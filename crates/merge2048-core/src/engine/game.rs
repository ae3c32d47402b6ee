use rand::rngs::StdRng;
use rand::SeedableRng;

use super::ops;
use super::state::{Board, Move};
use crate::error::GameError;

/// Result of applying a single move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Whether any cell changed position or value. Spawning a tile after the
    /// move is only legal when this is true.
    pub moved: bool,
    /// Whether a merge produced the goal tile during this move. Informational:
    /// play continues either way.
    pub reached_goal: bool,
}

/// The grid engine: an owned board plus the RNG that feeds tile spawns.
///
/// The engine never spawns on its own. Callers apply a move, and when the
/// outcome says the board changed they follow up with [`Game::spawn_tile`]
/// and then consult [`Game::is_terminal`].
pub struct Game {
    board: Board,
    rng: StdRng,
}

impl Game {
    /// New game with an entropy-seeded RNG and the two starting tiles placed.
    pub fn new(size: usize) -> Result<Self, GameError> {
        Self::with_rng(size, StdRng::from_entropy())
    }

    /// New game with a fixed seed, for reproducible runs and tests.
    pub fn from_seed(size: usize, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(size, StdRng::seed_from_u64(seed))
    }

    /// Resume from an explicit position, for tests and embedders.
    pub fn from_position(board: Board, seed: u64) -> Self {
        Game {
            board,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn with_rng(size: usize, mut rng: StdRng) -> Result<Self, GameError> {
        if size == 0 {
            return Err(GameError::InvalidSize { size });
        }
        let mut board = Board::empty(size);
        for _ in 0..2 {
            // a 1x1 board is full after the first starting tile
            if ops::spawn_tile(&mut board, &mut rng).is_err() {
                break;
            }
        }
        Ok(Game { board, rng })
    }

    /// Slide and merge tiles in `dir`.
    ///
    /// Mutates the board and reports whether anything changed; a no-op move
    /// leaves the board untouched and must not be followed by a spawn.
    pub fn apply_move(&mut self, dir: Move) -> MoveOutcome {
        let result = ops::shift(&mut self.board, dir);
        MoveOutcome {
            moved: result.moved,
            reached_goal: result.reached_goal,
        }
    }

    /// Place a fresh tile (2 with probability 9/10, else 4) on a uniformly
    /// random empty cell. Fails with [`GameError::BoardFull`] when no empty
    /// cell exists.
    pub fn spawn_tile(&mut self) -> Result<(), GameError> {
        ops::spawn_tile(&mut self.board, &mut self.rng)
    }

    /// True when no empty cell remains and no adjacent pair can merge.
    pub fn is_terminal(&self) -> bool {
        self.board.is_stuck()
    }

    /// Read-only view of the grid, for rendering.
    pub fn board(&self) -> &Board {
        &self.board
    }
}
