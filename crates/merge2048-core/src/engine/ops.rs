use rand::Rng;

use super::state::{Board, Move};
use super::GOAL_TILE;
use crate::error::GameError;

/// Outcome of compacting a single line toward index 0.
pub(crate) struct LineResult {
    pub(crate) cells: Vec<u64>,
    pub(crate) reached_goal: bool,
}

/// Outcome of shifting the whole board in one direction.
pub(crate) struct ShiftResult {
    pub(crate) moved: bool,
    pub(crate) reached_goal: bool,
}

/// Slide a line toward index 0, merging equal neighbors.
///
/// A slot produced by a merge never merges again within the same pass, so
/// `[2, 2, 2, 2]` compacts to `[4, 4, 0, 0]` and not `[8, 0, 0, 0]`.
pub(crate) fn compact_line(line: &[u64]) -> LineResult {
    let mut cells = vec![0; line.len()];
    let mut cursor = 0;
    let mut merged = false;
    let mut reached_goal = false;
    for &value in line.iter().filter(|&&v| v != 0) {
        if cursor > 0 && cells[cursor - 1] == value && !merged {
            cells[cursor - 1] *= 2;
            merged = true;
            if cells[cursor - 1] == GOAL_TILE {
                reached_goal = true;
            }
        } else {
            cells[cursor] = value;
            cursor += 1;
            merged = false;
        }
    }
    LineResult {
        cells,
        reached_goal,
    }
}

/// Cell coordinates of line `idx`, listed in the direction of travel.
///
/// Rows serve Left/Right and columns serve Up/Down; the traversal order is
/// what lets one compaction routine cover all four directions.
fn line_coords(size: usize, dir: Move, idx: usize) -> Vec<(usize, usize)> {
    (0..size)
        .map(|k| match dir {
            Move::Left => (idx, k),
            Move::Right => (idx, size - 1 - k),
            Move::Up => (k, idx),
            Move::Down => (size - 1 - k, idx),
        })
        .collect()
}

/// Slide and merge every line of the board in `dir`, in place.
pub(crate) fn shift(board: &mut Board, dir: Move) -> ShiftResult {
    let size = board.size();
    let mut moved = false;
    let mut reached_goal = false;
    for idx in 0..size {
        let coords = line_coords(size, dir, idx);
        let before: Vec<u64> = coords.iter().map(|&(r, c)| board.get(r, c)).collect();
        let result = compact_line(&before);
        reached_goal |= result.reached_goal;
        if result.cells != before {
            moved = true;
            for (&(r, c), &value) in coords.iter().zip(&result.cells) {
                board.set(r, c, value);
            }
        }
    }
    ShiftResult {
        moved,
        reached_goal,
    }
}

/// Full scan: true iff no cell is empty and no orthogonally-adjacent pair
/// holds equal values.
pub(crate) fn is_stuck(board: &Board) -> bool {
    let size = board.size();
    for row in 0..size {
        for col in 0..size {
            let value = board.get(row, col);
            if value == 0 {
                return false;
            }
            if row + 1 < size && board.get(row + 1, col) == value {
                return false;
            }
            if col + 1 < size && board.get(row, col + 1) == value {
                return false;
            }
        }
    }
    true
}

/// Value for a fresh tile: 2 nine times out of ten, otherwise 4.
pub(crate) fn draw_tile<R: Rng + ?Sized>(rng: &mut R) -> u64 {
    if rng.gen_range(0..10) < 9 {
        2
    } else {
        4
    }
}

/// Place a fresh tile on a uniformly random empty cell.
///
/// Picks the n-th empty cell for a random n instead of rejection-sampling
/// coordinates, so the walk stays bounded even on a nearly full board.
pub(crate) fn spawn_tile<R: Rng + ?Sized>(board: &mut Board, rng: &mut R) -> Result<(), GameError> {
    let empty = board.count_empty();
    if empty == 0 {
        return Err(GameError::BoardFull);
    }
    let target = rng.gen_range(0..empty);
    let value = draw_tile(rng);
    let size = board.size();
    let mut seen = 0;
    for row in 0..size {
        for col in 0..size {
            if board.get(row, col) == 0 {
                if seen == target {
                    board.set(row, col, value);
                    return Ok(());
                }
                seen += 1;
            }
        }
    }
    unreachable!("count_empty guarantees an empty cell at index `target`");
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn compacted(line: &[u64]) -> Vec<u64> {
        compact_line(line).cells
    }

    #[test]
    fn compact_leaves_empty_and_blocked_lines_alone() {
        assert_eq!(compacted(&[0, 0, 0, 0]), vec![0, 0, 0, 0]);
        assert_eq!(compacted(&[2, 4, 2, 4]), vec![2, 4, 2, 4]);
    }

    #[test]
    fn compact_slides_over_gaps() {
        assert_eq!(compacted(&[0, 2, 0, 4]), vec![2, 4, 0, 0]);
        assert_eq!(compacted(&[0, 0, 0, 2]), vec![2, 0, 0, 0]);
    }

    #[test]
    fn compact_merges_across_gaps() {
        assert_eq!(compacted(&[2, 0, 0, 2]), vec![4, 0, 0, 0]);
        assert_eq!(compacted(&[0, 2, 2, 0]), vec![4, 0, 0, 0]);
    }

    #[test]
    fn compact_merges_each_slot_at_most_once() {
        assert_eq!(compacted(&[2, 2, 2, 2]), vec![4, 4, 0, 0]);
        assert_eq!(compacted(&[4, 2, 2, 0]), vec![4, 4, 0, 0]);
        assert_eq!(compacted(&[2, 2, 4, 4]), vec![4, 8, 0, 0]);
        assert_eq!(compacted(&[4, 4, 4, 0]), vec![8, 4, 0, 0]);
    }

    #[test]
    fn compact_handles_lines_of_any_length() {
        assert_eq!(compacted(&[2]), vec![2]);
        assert_eq!(compacted(&[2, 2, 2]), vec![4, 2, 0]);
        assert_eq!(compacted(&[0, 2, 2, 2, 2, 4]), vec![4, 4, 4, 0, 0, 0]);
    }

    #[test]
    fn compact_reports_the_goal_tile() {
        let result = compact_line(&[1024, 1024, 0, 0]);
        assert_eq!(result.cells, vec![2048, 0, 0, 0]);
        assert!(result.reached_goal);

        let result = compact_line(&[2048, 2048, 0, 0]);
        assert_eq!(result.cells, vec![4096, 0, 0, 0]);
        assert!(!result.reached_goal);
    }

    #[test]
    fn shift_left_compacts_rows_toward_column_zero() {
        let mut board = Board::from_rows(&[[2, 2], [4, 4]]);
        let result = shift(&mut board, Move::Left);
        assert!(result.moved);
        assert_eq!(board, Board::from_rows(&[[4, 0], [8, 0]]));
    }

    #[test]
    fn shift_right_compacts_rows_toward_the_last_column() {
        let mut board = Board::from_rows(&[[2, 2, 0, 0], [0, 4, 4, 0], [2, 0, 2, 0], [8, 8, 8, 8]]);
        let result = shift(&mut board, Move::Right);
        assert!(result.moved);
        assert_eq!(
            board,
            Board::from_rows(&[[0, 0, 0, 4], [0, 0, 0, 8], [0, 0, 0, 4], [0, 0, 16, 16]])
        );
    }

    #[test]
    fn shift_up_compacts_columns_toward_row_zero() {
        let mut board = Board::from_rows(&[[2, 0, 2, 8], [2, 4, 0, 8], [0, 4, 2, 8], [0, 0, 0, 8]]);
        let result = shift(&mut board, Move::Up);
        assert!(result.moved);
        assert_eq!(
            board,
            Board::from_rows(&[[4, 8, 4, 16], [0, 0, 0, 16], [0, 0, 0, 0], [0, 0, 0, 0]])
        );
    }

    #[test]
    fn shift_down_compacts_columns_toward_the_last_row() {
        let mut board = Board::from_rows(&[[2, 0, 2, 8], [2, 4, 0, 8], [0, 4, 2, 8], [0, 0, 0, 8]]);
        let result = shift(&mut board, Move::Down);
        assert!(result.moved);
        assert_eq!(
            board,
            Board::from_rows(&[[0, 0, 0, 0], [0, 0, 0, 0], [0, 0, 0, 16], [4, 8, 4, 16]])
        );
    }

    #[test]
    fn shift_reports_no_movement_on_a_settled_board() {
        let mut board = Board::from_rows(&[[2, 0, 0, 0], [4, 0, 0, 0], [8, 0, 0, 0], [16, 0, 0, 0]]);
        let before = board.clone();
        let result = shift(&mut board, Move::Left);
        assert!(!result.moved);
        assert_eq!(board, before);
    }

    #[test]
    fn shift_twice_in_a_row_is_a_no_op_the_second_time() {
        // distinct values per line: the first shift cannot mint a new pair
        let board = Board::from_rows(&[[2, 0, 4, 0], [0, 8, 0, 2], [4, 0, 16, 0], [0, 2, 0, 32]]);
        for dir in Move::ALL {
            let mut scratch = board.clone();
            shift(&mut scratch, dir);
            let again = shift(&mut scratch, dir);
            assert!(!again.moved, "second {dir:?} on a compacted board moved");
        }
    }

    #[test]
    fn shift_conserves_the_tile_sum() {
        let board = Board::from_rows(&[[2, 2, 4, 0], [0, 8, 8, 0], [2, 0, 2, 4], [16, 0, 0, 16]]);
        let sum: u64 = board.cells().iter().sum();
        for dir in Move::ALL {
            let mut scratch = board.clone();
            shift(&mut scratch, dir);
            assert_eq!(scratch.cells().iter().sum::<u64>(), sum);
        }
    }

    #[test]
    fn shift_never_increases_the_tile_count() {
        let board = Board::from_rows(&[[2, 2, 4, 0], [0, 8, 8, 0], [2, 0, 2, 4], [16, 0, 0, 16]]);
        let count = board.size() * board.size() - board.count_empty();
        for dir in Move::ALL {
            let mut scratch = board.clone();
            shift(&mut scratch, dir);
            let after = scratch.size() * scratch.size() - scratch.count_empty();
            assert!(after <= count);
        }
    }

    #[test]
    fn is_stuck_needs_a_full_board_with_no_equal_neighbors() {
        let stuck = Board::from_rows(&[[2, 4], [4, 2]]);
        assert!(is_stuck(&stuck));

        let has_gap = Board::from_rows(&[[2, 4], [4, 0]]);
        assert!(!is_stuck(&has_gap));

        let row_pair = Board::from_rows(&[[2, 2], [4, 8]]);
        assert!(!is_stuck(&row_pair));

        let col_pair = Board::from_rows(&[[2, 4], [2, 8]]);
        assert!(!is_stuck(&col_pair));
    }

    #[test]
    fn is_stuck_scans_the_full_grid() {
        let board = Board::from_rows(&[
            [2, 4, 2, 4],
            [4, 2, 4, 2],
            [2, 4, 2, 4],
            [4, 2, 4, 4], // the only pair sits in the last corner
        ]);
        assert!(!is_stuck(&board));
    }

    #[test]
    fn draw_tile_yields_only_twos_and_fours() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut saw_two = false;
        let mut saw_four = false;
        for _ in 0..200 {
            match draw_tile(&mut rng) {
                2 => saw_two = true,
                4 => saw_four = true,
                other => panic!("unexpected tile value {other}"),
            }
        }
        assert!(saw_two && saw_four);
    }

    #[test]
    fn spawn_fills_every_cell_exactly_once() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut board = Board::empty(3);
        for expected in (0..9).rev() {
            assert_eq!(board.count_empty(), expected + 1);
            spawn_tile(&mut board, &mut rng).unwrap();
            assert_eq!(board.count_empty(), expected);
        }
        assert_eq!(spawn_tile(&mut board, &mut rng), Err(GameError::BoardFull));
    }

    #[test]
    fn spawn_only_touches_empty_cells() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut board = Board::from_rows(&[[2, 0], [4, 8]]);
        spawn_tile(&mut board, &mut rng).unwrap();
        assert_eq!(board.get(0, 0), 2);
        assert_eq!(board.get(1, 0), 4);
        assert_eq!(board.get(1, 1), 8);
        assert!(board.get(0, 1) == 2 || board.get(0, 1) == 4);
    }
}
