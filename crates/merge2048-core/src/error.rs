/// Errors surfaced by the grid engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("board size must be at least 1, got {size}")]
    InvalidSize { size: usize },

    #[error("cannot spawn a tile: the board has no empty cell")]
    BoardFull,
}
