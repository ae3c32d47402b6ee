use std::fmt;

use serde::{Deserialize, Serialize};

use super::ops;

/// A direction to slide/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// All four directions, for iteration.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

/// An N x N grid of tiles stored row-major; `0` marks an empty cell.
///
/// Non-empty cells always hold a power of two >= 2. A board is owned by a
/// [`Game`](super::Game) and handed to callers by shared reference only.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<u64>,
}

impl Board {
    /// An empty `size` x `size` board.
    pub(crate) fn empty(size: usize) -> Self {
        debug_assert!(size > 0, "size is validated at game construction");
        Board {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Build a board from explicit rows. Panics unless the input is square.
    ///
    /// Escape hatch for tests and embedders that need a known position.
    pub fn from_rows<R: AsRef<[u64]>>(rows: &[R]) -> Self {
        let size = rows.len();
        assert!(size > 0, "from_rows needs at least one row");
        let mut cells = Vec::with_capacity(size * size);
        for row in rows {
            let row = row.as_ref();
            assert_eq!(row.len(), size, "from_rows needs square input");
            cells.extend_from_slice(row);
        }
        Board { size, cells }
    }

    /// Side length of the board.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Value at `(row, col)`; `0` means empty.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u64 {
        self.cells[row * self.size + col]
    }

    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, value: u64) {
        self.cells[row * self.size + col] = value;
    }

    /// Iterate over the rows of the board, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[u64]> {
        self.cells.chunks(self.size)
    }

    /// Flat row-major view of all cells.
    #[inline]
    pub fn cells(&self) -> &[u64] {
        &self.cells
    }

    /// Number of empty cells.
    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    /// Largest tile on the board, or 0 when the board is empty.
    pub fn max_tile(&self) -> u64 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// True when the board has neither an empty cell nor an adjacent equal
    /// pair in any row or column.
    pub fn is_stuck(&self) -> bool {
        ops::is_stuck(self)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // cell width follows the widest tile currently on the board
        let width = self.max_tile().max(2).to_string().len();
        let mut separator = String::with_capacity(self.size * (width + 1) + 1);
        for _ in 0..self.size {
            separator.push('+');
            for _ in 0..width {
                separator.push('-');
            }
        }
        separator.push('+');

        for row in self.rows() {
            writeln!(f, "{separator}")?;
            write!(f, "|")?;
            for &cell in row {
                if cell == 0 {
                    write!(f, "{:>width$}|", "")?;
                } else {
                    write!(f, "{cell:>width$}|")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "{separator}")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({0}x{0}, {1:?})", self.size, self.cells)
    }
}
